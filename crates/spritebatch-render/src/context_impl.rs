//! Implementation of BufferBackend for GraphicsContext.
//!
//! This lets render buffers upload through either a real device or
//! `MockBufferBackend` in tests.

use crate::context::GraphicsContext;
use spritebatch_gpu::{BufferBackend, GpuBuffer};
use wgpu::BufferDescriptor;

impl BufferBackend for GraphicsContext {
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let buffer = self.device().create_buffer(desc);
        GpuBuffer::from_wgpu(buffer)
    }

    fn bind(&self, _buffer: &GpuBuffer) {
        // wgpu binds vertex buffers per render pass (`set_vertex_buffer`).
    }

    fn upload_data(&self, buffer: &GpuBuffer, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        match buffer.as_wgpu() {
            Some(wgpu_buffer) => self.queue().write_buffer(wgpu_buffer, 0, data),
            None => tracing::warn!("Ignoring upload into a non-wgpu buffer"),
        }
    }

    fn destroy(&self, buffer: GpuBuffer) {
        if let Some(wgpu_buffer) = buffer.as_wgpu() {
            wgpu_buffer.destroy();
        }
    }
}
