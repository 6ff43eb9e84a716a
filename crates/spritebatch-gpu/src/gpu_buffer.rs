//! Owned vertex buffer handles.

/// A vertex buffer handed out by a [`BufferBackend`](crate::BufferBackend).
///
/// The handle remembers the size and usage it was created with, so callers
/// can check an allocation without touching the device. Batching code never
/// looks at which kind of backend produced it.
#[derive(Clone, Debug)]
pub struct GpuBuffer {
    handle: Handle,
    size: u64,
    usage: wgpu::BufferUsages,
}

#[derive(Clone, Debug)]
enum Handle {
    Device(wgpu::Buffer),
    #[cfg(feature = "mock")]
    Recorded(usize),
}

impl GpuBuffer {
    /// Wrap a buffer allocated on a wgpu device.
    pub fn from_wgpu(buffer: wgpu::Buffer) -> Self {
        Self {
            size: buffer.size(),
            usage: buffer.usage(),
            handle: Handle::Device(buffer),
        }
    }

    /// A handle that only exists in a recording backend.
    #[cfg(feature = "mock")]
    pub fn mock(id: usize, size: u64) -> Self {
        Self::mock_with_usage(id, size, wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST)
    }

    #[cfg(feature = "mock")]
    pub fn mock_with_usage(id: usize, size: u64, usage: wgpu::BufferUsages) -> Self {
        Self {
            handle: Handle::Recorded(id),
            size,
            usage,
        }
    }

    /// Size of the allocation in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn usage(&self) -> wgpu::BufferUsages {
        self.usage
    }

    /// Whether `bytes` fits in the allocation from offset zero.
    pub fn fits(&self, bytes: usize) -> bool {
        u64::try_from(bytes).is_ok_and(|bytes| bytes <= self.size)
    }

    /// The device buffer, if this handle came from a wgpu device.
    pub fn as_wgpu(&self) -> Option<&wgpu::Buffer> {
        match &self.handle {
            Handle::Device(buffer) => Some(buffer),
            #[cfg(feature = "mock")]
            Handle::Recorded(_) => None,
        }
    }

    #[cfg(feature = "mock")]
    pub fn is_mock(&self) -> bool {
        matches!(self.handle, Handle::Recorded(_))
    }

    /// Id assigned by the recording backend.
    #[cfg(feature = "mock")]
    pub fn mock_id(&self) -> Option<usize> {
        match self.handle {
            Handle::Recorded(id) => Some(id),
            Handle::Device(_) => None,
        }
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;

    #[test]
    fn test_mock_handle_reports_allocation() {
        let buffer = GpuBuffer::mock(3, 256);
        assert!(buffer.is_mock());
        assert_eq!(buffer.mock_id(), Some(3));
        assert_eq!(buffer.size(), 256);
        assert!(buffer.usage().contains(wgpu::BufferUsages::VERTEX));
        assert!(buffer.as_wgpu().is_none());
    }

    #[test]
    fn test_fits() {
        let buffer = GpuBuffer::mock(0, 128);
        assert!(buffer.fits(0));
        assert!(buffer.fits(128));
        assert!(!buffer.fits(129));
    }
}
