//! GPU buffer backend for spritebatch.
//!
//! A render buffer only ever needs four things from the GPU: create a vertex
//! buffer, bind it, replace its contents, and destroy it. This crate puts those
//! four operations behind the object-safe [`BufferBackend`] trait so batching
//! code can be driven by a real `wgpu` device or by a recording mock.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use spritebatch_gpu::{BufferBackend, MockBufferBackend};
//! use wgpu::*;
//!
//! let mock = MockBufferBackend::new();
//!
//! let buffer = mock.create_buffer(&BufferDescriptor {
//!     label: Some("quads"),
//!     size: 1024,
//!     usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
//!     mapped_at_creation: false,
//! });
//! mock.bind(&buffer);
//! mock.upload_data(&buffer, &[0u8; 64]);
//! mock.destroy(buffer);
//!
//! assert_eq!(mock.count_buffer_creates(), 1);
//! assert_eq!(mock.live_buffers(), 0);
//! # }
//! ```

pub mod backend;
pub mod gpu_buffer;
#[cfg(feature = "mock")]
pub mod mock_backend;

pub use backend::*;
pub use gpu_buffer::*;
#[cfg(feature = "mock")]
pub use mock_backend::*;
