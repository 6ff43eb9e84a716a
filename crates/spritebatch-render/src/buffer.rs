//! Quad batch accumulator.
//!
//! A [`RenderBuffer`] collects quads for a single draw call. It enforces two
//! limits and reports them instead of acting on them:
//!
//! - capacity: at most `max_combine` quads ([`BatchError::Full`])
//! - texture: every quad was appended under one texture id
//!   ([`BatchError::TextureMismatch`])
//!
//! Rolling back a partially appended node is a truncation of the quad array
//! to the length recorded when the node started.

use spritebatch_core::profiling::profile_function;
use spritebatch_gpu::{BufferBackend, GpuBuffer};

use crate::config::{DEFAULT_MAX_COMBINE, RenderBufferConfig};
use crate::error::{BatchError, BatchResult};
use crate::vertex::{Quad, VertexPack};

/// Quads for one draw call, all sharing one texture.
///
/// # Example
///
/// ```
/// use spritebatch_render::{RenderBuffer, RenderBufferConfig, VertexPack, BatchError};
///
/// let mut rb = RenderBuffer::new(RenderBufferConfig::default().with_max_combine(2));
/// rb.ensure_texture(3).unwrap();
/// let vb = [VertexPack::default(); 4];
/// assert!(rb.append(&vb, 0xFFFF_FFFF).is_ok());
/// assert_eq!(rb.append(&vb, 0xFFFF_FFFF), Err(BatchError::Full));
/// assert_eq!(rb.object(), 2);
/// ```
#[derive(Debug)]
pub struct RenderBuffer {
    quads: Vec<Quad>,
    max_combine: usize,
    texid: u32,
    gpu_buffer: Option<GpuBuffer>,
    label: Option<String>,
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new(RenderBufferConfig::default())
    }
}

impl RenderBuffer {
    /// Create an empty buffer: no quads, texture 0, no GPU buffer.
    pub fn new(config: RenderBufferConfig) -> Self {
        let max_combine = config.max_combine.max(1);
        Self {
            quads: Vec::with_capacity(max_combine.min(DEFAULT_MAX_COMBINE)),
            max_combine,
            texid: 0,
            gpu_buffer: None,
            label: config.label,
        }
    }

    /// Return to the freshly created state.
    ///
    /// The GPU buffer handle is forgotten, not destroyed; call
    /// [`unload`](Self::unload) first if one was uploaded.
    pub fn init(&mut self) {
        if self.gpu_buffer.is_some() {
            tracing::warn!("RenderBuffer::init dropped a GPU buffer that was never unloaded");
        }
        self.quads.clear();
        self.texid = 0;
        self.gpu_buffer = None;
    }

    /// Drop all quads for a new frame, keeping the texture tag and GPU buffer.
    pub fn clear(&mut self) {
        self.quads.clear();
    }

    /// Number of quads appended so far.
    pub fn object(&self) -> usize {
        self.quads.len()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Whether no further quad can be appended.
    pub fn is_full(&self) -> bool {
        self.quads.len() >= self.max_combine
    }

    pub fn capacity(&self) -> usize {
        self.max_combine
    }

    /// Texture every quad in the batch samples from.
    pub fn texid(&self) -> u32 {
        self.texid
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Raw vertex data of the appended quads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.quads)
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu_buffer.is_some()
    }

    pub fn gpu_buffer(&self) -> Option<&GpuBuffer> {
        self.gpu_buffer.as_ref()
    }

    /// Append one quad colored with the packed ARGB `color`.
    ///
    /// Returns [`BatchError::Full`] without writing when the buffer is already
    /// saturated. When this quad takes the last free slot it is written and
    /// `Full` is returned as well, telling the caller to stop appending.
    pub fn append(&mut self, vb: &[VertexPack; 4], color: u32) -> BatchResult {
        if self.is_full() {
            return Err(BatchError::Full);
        }
        self.quads.push(Quad::new(vb, color));
        if self.is_full() {
            return Err(BatchError::Full);
        }
        Ok(())
    }

    /// Bind the batch to `texid`, or report that it is bound to another texture.
    ///
    /// An empty batch adopts any texture. On mismatch nothing is modified.
    pub fn ensure_texture(&mut self, texid: u32) -> BatchResult {
        if self.quads.is_empty() {
            self.texid = texid;
        } else if self.texid != texid {
            return Err(BatchError::TextureMismatch {
                bound: self.texid,
                requested: texid,
            });
        }
        Ok(())
    }

    /// Discard every quad appended after the buffer held `object` quads.
    pub fn rollback(&mut self, object: usize) {
        if object < self.quads.len() {
            tracing::trace!(
                "Rolling back {} quads (to {})",
                self.quads.len() - object,
                object
            );
            self.quads.truncate(object);
        }
    }

    fn byte_capacity(&self) -> u64 {
        (self.max_combine as u64).saturating_mul(std::mem::size_of::<Quad>() as u64)
    }

    /// Copy the appended quads into GPU memory.
    ///
    /// The GPU buffer is created on first use, sized for the full capacity.
    /// Every upload replaces the previous contents; an empty batch uploads
    /// zero bytes.
    pub fn upload(&mut self, backend: &dyn BufferBackend) {
        profile_function!();

        if self.gpu_buffer.is_none() {
            let buffer = backend.create_buffer(&wgpu::BufferDescriptor {
                label: self.label.as_deref(),
                size: self.byte_capacity(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            tracing::debug!(
                "Created vertex buffer for {} quads ({} bytes)",
                self.max_combine,
                buffer.size()
            );
            self.gpu_buffer = Some(buffer);
        }

        if let Some(buffer) = &self.gpu_buffer {
            backend.bind(buffer);
            backend.upload_data(buffer, bytemuck::cast_slice(&self.quads));
            tracing::debug!(
                "Uploaded {} quads for texture {}",
                self.quads.len(),
                self.texid
            );
        }
    }

    /// Release the GPU buffer. Calling this without an uploaded buffer is a no-op.
    pub fn unload(&mut self, backend: &dyn BufferBackend) {
        if let Some(buffer) = self.gpu_buffer.take() {
            backend.destroy(buffer);
            tracing::debug!("Released vertex buffer");
        }
    }
}
