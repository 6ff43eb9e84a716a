/// Quad capacity used when none is configured.
pub const DEFAULT_MAX_COMBINE: usize = 1024;

/// Configuration for a [`RenderBuffer`](crate::RenderBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBufferConfig {
    /// Maximum number of quads one batch holds. Always at least 1.
    pub max_combine: usize,
    /// Debug label given to the GPU vertex buffer.
    pub label: Option<String>,
}

impl Default for RenderBufferConfig {
    fn default() -> Self {
        Self {
            max_combine: DEFAULT_MAX_COMBINE,
            label: Some("Sprite Batch Vertex Buffer".to_string()),
        }
    }
}

impl RenderBufferConfig {
    pub fn with_max_combine(mut self, max_combine: usize) -> Self {
        self.max_combine = max_combine.max(1);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
