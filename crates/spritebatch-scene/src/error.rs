/// Errors raised while assembling sprite pack data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A polygon face needs at least three vertices.
    TooFewVertices { vertices: usize },

    /// Screen and texture coordinate arrays have different lengths.
    CoordinateCountMismatch { screen: usize, texture: usize },

    /// An animation frame references a child slot that does not exist.
    ComponentOutOfRange { component_id: usize, slots: usize },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::TooFewVertices { vertices } => {
                write!(f, "Polygon face needs at least 3 vertices, got {}", vertices)
            }
            SceneError::CoordinateCountMismatch { screen, texture } => write!(
                f,
                "Coordinate count mismatch: {} screen points but {} texture points",
                screen, texture
            ),
            SceneError::ComponentOutOfRange {
                component_id,
                slots,
            } => write!(
                f,
                "Component {} out of range (animation has {} child slots)",
                component_id, slots
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Result type for scene assembly.
pub type SceneResult<T> = Result<T, SceneError>;
