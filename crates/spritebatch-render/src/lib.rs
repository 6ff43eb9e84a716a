//! Sprite batching.
//!
//! Flattens a [`Sprite`](spritebatch_scene::Sprite) tree into a
//! [`RenderBuffer`] of textured quads that one draw call can consume.
//!
//! ```text
//! Sprite tree ──draw_sprite──▶ RenderBuffer ──upload──▶ GPU vertex buffer
//!                 │                 │
//!                 │                 ├─ Full: flush, then retry the node
//!                 │                 └─ TextureMismatch: flush, then retry the node
//!                 └─ Unbatchable: draw the node through another path
//! ```
//!
//! The batcher never flushes on its own. Every boundary is reported as a
//! [`BatchError`] and the caller picks the policy.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spritebatch_render::{draw_sprite, RenderBuffer};
//! use spritebatch_scene::{PackPicture, PictureFace, Sprite};
//!
//! let pack = Arc::new(PackPicture::new(vec![
//!     PictureFace::rect(7, 0, 0, 16, 16, 0, 0),
//!     PictureFace::rect(7, 16, 0, 16, 16, 16, 0),
//! ]));
//! let mut rb = RenderBuffer::default();
//! draw_sprite(&mut rb, &Sprite::picture(pack)).unwrap();
//! assert_eq!(rb.object(), 2);
//! assert_eq!(rb.texid(), 7);
//! ```

pub mod buffer;
pub mod config;
pub mod context;
mod context_impl;
pub mod draw;
pub mod error;
pub mod polygon;
pub mod vertex;

pub use buffer::RenderBuffer;
pub use config::{DEFAULT_MAX_COMBINE, RenderBufferConfig};
pub use context::{GraphicsContext, GraphicsContextDescriptor};
pub use draw::{draw, draw_sprite};
pub use error::{BatchError, BatchResult, GraphicsError, Unbatchable};
pub use polygon::{FanQuads, add_polygon, fan_quads};
pub use vertex::{Quad, Vertex, VertexPack, decode_color};

pub use spritebatch_gpu::{BufferBackend, GpuBuffer};
