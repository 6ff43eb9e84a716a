use std::sync::Arc;

use crate::buffer::RenderBuffer;
use crate::config::RenderBufferConfig;
use crate::error::GraphicsError;
use crate::vertex::Quad;

/// A wgpu device and queue that render buffers upload into.
///
/// Shared behind `Arc`; implements [`BufferBackend`](spritebatch_gpu::BufferBackend).
///
/// ```rust,no_run
/// use spritebatch_render::{GraphicsContext, RenderBufferConfig};
///
/// let ctx = GraphicsContext::new_owned_sync().expect("no GPU available");
/// let mut rb = ctx.render_buffer(RenderBufferConfig::default());
/// rb.upload(ctx.as_ref());
/// ```
pub struct GraphicsContext {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GraphicsContext {
    pub async fn new_owned() -> Result<Arc<Self>, GraphicsError> {
        Self::new_owned_with_descriptor(GraphicsContextDescriptor::default()).await
    }

    /// Blocking variant of [`new_owned`](Self::new_owned).
    pub fn new_owned_sync() -> Result<Arc<Self>, GraphicsError> {
        pollster::block_on(Self::new_owned())
    }

    pub async fn new_owned_with_descriptor(
        descriptor: GraphicsContextDescriptor,
    ) -> Result<Arc<Self>, GraphicsError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: descriptor.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: descriptor.power_preference,
                compatible_surface: None,
                force_fallback_adapter: descriptor.force_fallback_adapter,
            })
            .await
            .map_err(|e| GraphicsError::NoAdapter(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: descriptor.label,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| GraphicsError::DeviceRequest(e.to_string()))?;

        let info = adapter.get_info();
        tracing::info!("Created graphics context on {} ({:?})", info.name, info.backend);

        Ok(Arc::new(Self {
            adapter,
            device,
            queue,
        }))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Largest buffer the device accepts.
    pub fn max_buffer_size(&self) -> u64 {
        self.device.limits().max_buffer_size
    }

    /// How many quads fit in one vertex buffer on this device.
    pub fn max_quads(&self) -> usize {
        let quads = self.max_buffer_size() / std::mem::size_of::<Quad>() as u64;
        usize::try_from(quads).unwrap_or(usize::MAX)
    }

    /// A render buffer whose capacity the device can actually allocate.
    pub fn render_buffer(&self, config: RenderBufferConfig) -> RenderBuffer {
        let limit = self.max_quads();
        if config.max_combine > limit {
            tracing::warn!(
                "Clamping render buffer capacity from {} to {} quads",
                config.max_combine,
                limit
            );
            return RenderBuffer::new(config.with_max_combine(limit));
        }
        RenderBuffer::new(config)
    }
}

/// How to pick the adapter and device behind a [`GraphicsContext`].
#[derive(Debug, Clone)]
pub struct GraphicsContextDescriptor {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    /// Only accept a software adapter.
    pub force_fallback_adapter: bool,
    /// Debug label for the device.
    pub label: Option<&'static str>,
}

impl GraphicsContextDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_fallback_adapter(mut self) -> Self {
        self.force_fallback_adapter = true;
        self
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

impl Default for GraphicsContextDescriptor {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            label: None,
        }
    }
}
