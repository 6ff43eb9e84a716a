use spritebatch_scene::SpriteKind;

/// Why a batch cannot take more geometry.
///
/// None of these are fatal. The caller decides whether to flush the current
/// buffer and retry the node, or to hand the node to a non-batched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The buffer reached its quad capacity. Flush and resume at the failing node.
    Full,

    /// The node needs a different texture than the one the batch is bound to.
    TextureMismatch { bound: u32, requested: u32 },

    /// The node cannot be expressed as quads in this batch at all.
    Unbatchable(Unbatchable),
}

/// Node configurations that never go through the quad batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unbatchable {
    /// Rich-text labels are rasterized by the text renderer.
    RichTextLabel,
    /// The anchor has a pre-rendered surface attached.
    PreRenderedAnchor,
    /// Scissoring panels need their own clip state.
    ScissorPanel,
    /// The animation's frame counter does not resolve to a frame.
    InvalidFrame {
        frame: i32,
        total_frame: usize,
        frame_count: usize,
    },
    /// A node kind with no quad representation.
    UnsupportedKind(&'static str),
}

impl Unbatchable {
    pub(crate) fn unsupported(kind: &SpriteKind) -> Self {
        Unbatchable::UnsupportedKind(kind.name())
    }
}

impl BatchError {
    /// Status code of the C-style caller contract: `1` for a full buffer,
    /// `-1` for anything that cannot be batched here.
    pub fn code(&self) -> i32 {
        match self {
            BatchError::Full => 1,
            BatchError::TextureMismatch { .. } | BatchError::Unbatchable(_) => -1,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, BatchError::Full)
    }

    /// Texture boundaries count as unbatchable: the node cannot join this batch.
    pub fn is_unbatchable(&self) -> bool {
        !self.is_full()
    }
}

impl std::fmt::Display for Unbatchable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unbatchable::RichTextLabel => write!(f, "rich text label"),
            Unbatchable::PreRenderedAnchor => write!(f, "anchor with pre-rendered surface"),
            Unbatchable::ScissorPanel => write!(f, "scissor panel"),
            Unbatchable::InvalidFrame {
                frame,
                total_frame,
                frame_count,
            } => write!(
                f,
                "frame {} does not resolve (action length {}, {} frames packed)",
                frame, total_frame, frame_count
            ),
            Unbatchable::UnsupportedKind(kind) => write!(f, "unsupported sprite kind '{}'", kind),
        }
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Full => write!(f, "Render buffer is full"),
            BatchError::TextureMismatch { bound, requested } => write!(
                f,
                "Texture mismatch: batch is bound to texture {} but texture {} was requested",
                bound, requested
            ),
            BatchError::Unbatchable(reason) => write!(f, "Cannot batch node: {}", reason),
        }
    }
}

impl std::error::Error for BatchError {}

impl From<Unbatchable> for BatchError {
    fn from(reason: Unbatchable) -> Self {
        BatchError::Unbatchable(reason)
    }
}

/// Result type for batching operations.
pub type BatchResult<T = ()> = Result<T, BatchError>;

/// Errors creating the wgpu graphics context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// No adapter matched the descriptor.
    NoAdapter(String),
    /// The adapter refused to create a device.
    DeviceRequest(String),
}

impl std::fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphicsError::NoAdapter(msg) => write!(f, "Failed to find a suitable GPU adapter: {}", msg),
            GraphicsError::DeviceRequest(msg) => write!(f, "Failed to create device: {}", msg),
        }
    }
}

impl std::error::Error for GraphicsError {}
