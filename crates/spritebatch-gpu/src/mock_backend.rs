//! Mock implementation of [`BufferBackend`] for testing.
//!
//! Records every operation without touching a GPU so tests can assert on the
//! exact hand-off sequence.

use crate::{backend::BufferBackend, gpu_buffer::GpuBuffer};
use parking_lot::Mutex;
use wgpu::{BufferDescriptor, BufferUsages};

/// Records a GPU buffer operation for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferCall {
    CreateBuffer { size: u64, usage: BufferUsages },
    Bind { buffer_id: usize },
    UploadData { buffer_id: usize, size: usize },
    Destroy { buffer_id: usize },
}

/// Mock implementation of [`BufferBackend`].
///
/// Methods take `&self` but record calls, so state lives behind
/// `parking_lot::Mutex` (which keeps the type `Send + Sync` as the trait
/// requires).
///
/// # Example
///
/// ```rust
/// use spritebatch_gpu::{BufferBackend, MockBufferBackend};
/// use wgpu::*;
///
/// let mock = MockBufferBackend::new();
/// let buffer = mock.create_buffer(&BufferDescriptor {
///     label: None,
///     size: 256,
///     usage: BufferUsages::VERTEX,
///     mapped_at_creation: false,
/// });
///
/// assert!(buffer.is_mock());
/// assert_eq!(mock.live_buffers(), 1);
/// ```
pub struct MockBufferBackend {
    /// Recorded calls for verification
    calls: Mutex<Vec<BufferCall>>,
    /// Liveness per created buffer, indexed by mock id
    buffers: Mutex<Vec<bool>>,
    /// Last uploaded bytes per buffer, indexed by mock id
    contents: Mutex<Vec<Vec<u8>>>,
}

impl MockBufferBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            buffers: Mutex::new(Vec::new()),
            contents: Mutex::new(Vec::new()),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<BufferCall> {
        self.calls.lock().clone()
    }

    /// Count buffer creations.
    pub fn count_buffer_creates(&self) -> usize {
        self.count(|call| matches!(call, BufferCall::CreateBuffer { .. }))
    }

    /// Count data uploads.
    pub fn count_uploads(&self) -> usize {
        self.count(|call| matches!(call, BufferCall::UploadData { .. }))
    }

    /// Count buffer destructions.
    pub fn count_destroys(&self) -> usize {
        self.count(|call| matches!(call, BufferCall::Destroy { .. }))
    }

    /// Number of buffers created and not yet destroyed.
    pub fn live_buffers(&self) -> usize {
        self.buffers.lock().iter().filter(|alive| **alive).count()
    }

    /// Bytes most recently uploaded into the buffer with `buffer_id`.
    pub fn contents(&self, buffer_id: usize) -> Option<Vec<u8>> {
        self.contents.lock().get(buffer_id).cloned()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn count(&self, predicate: impl Fn(&BufferCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }
}

impl Default for MockBufferBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferBackend for MockBufferBackend {
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let mut buffers = self.buffers.lock();
        let id = buffers.len();
        buffers.push(true);
        self.contents.lock().push(Vec::new());

        self.calls.lock().push(BufferCall::CreateBuffer {
            size: desc.size,
            usage: desc.usage,
        });

        GpuBuffer::mock_with_usage(id, desc.size, desc.usage)
    }

    fn bind(&self, buffer: &GpuBuffer) {
        if let Some(buffer_id) = buffer.mock_id() {
            self.calls.lock().push(BufferCall::Bind { buffer_id });
        }
    }

    fn upload_data(&self, buffer: &GpuBuffer, data: &[u8]) {
        if let Some(buffer_id) = buffer.mock_id() {
            if let Some(slot) = self.contents.lock().get_mut(buffer_id) {
                slot.clear();
                slot.extend_from_slice(data);
            }
            self.calls.lock().push(BufferCall::UploadData {
                buffer_id,
                size: data.len(),
            });
        }
    }

    fn destroy(&self, buffer: GpuBuffer) {
        if let Some(buffer_id) = buffer.mock_id() {
            if let Some(alive) = self.buffers.lock().get_mut(buffer_id) {
                *alive = false;
            }
            self.calls.lock().push(BufferCall::Destroy { buffer_id });
        }
    }
}
