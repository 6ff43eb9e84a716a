//! Trait abstracting the GPU vertex buffer primitives.

use crate::gpu_buffer::GpuBuffer;
use wgpu::BufferDescriptor;

/// The GPU operations a batch hand-off is defined in terms of.
///
/// Methods take `&self` and hand out owned [`GpuBuffer`] handles, so a backend
/// can be shared behind `Arc` and mocks can record calls with interior
/// mutability. The trait is object-safe and is normally used as
/// `&dyn BufferBackend`.
///
/// ```rust,no_run
/// use spritebatch_gpu::BufferBackend;
/// use wgpu::{BufferDescriptor, BufferUsages};
///
/// fn refresh(backend: &dyn BufferBackend, bytes: &[u8]) {
///     let buffer = backend.create_buffer(&BufferDescriptor {
///         label: None,
///         size: bytes.len() as u64,
///         usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
///         mapped_at_creation: false,
///     });
///     backend.bind(&buffer);
///     backend.upload_data(&buffer, bytes);
///     backend.destroy(buffer);
/// }
/// ```
pub trait BufferBackend: Send + Sync {
    /// Create a GPU buffer.
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer;

    /// Make `buffer` the current vertex buffer target.
    ///
    /// Backends without global binding state may treat this as a no-op.
    fn bind(&self, buffer: &GpuBuffer);

    /// Replace the contents of `buffer` with `data`, starting at offset zero.
    ///
    /// An empty slice is a legal upload.
    fn upload_data(&self, buffer: &GpuBuffer, data: &[u8]);

    /// Release `buffer`. The handle is consumed so it cannot be released twice.
    fn destroy(&self, buffer: GpuBuffer);
}
