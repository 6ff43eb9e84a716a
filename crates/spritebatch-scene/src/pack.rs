//! Pre-packed sprite asset payloads.
//!
//! These are produced by the asset loader and stay immutable while a scene is
//! batched. Screen coordinates are integers in the sprite's local space,
//! texture coordinates are texel positions inside the texture `texid` names.

use crate::error::{SceneError, SceneResult};
use crate::trans::SpriteTrans;
use spritebatch_core::math::IVec2;

/// Texture coordinate inside a packed texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TexCoord {
    pub u: u16,
    pub v: u16,
}

impl TexCoord {
    pub const fn new(u: u16, v: u16) -> Self {
        Self { u, v }
    }
}

/// A textured rectangle; corners are stored in drawing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFace {
    pub texid: u32,
    pub screen: [IVec2; 4],
    pub texture: [TexCoord; 4],
}

impl PictureFace {
    pub fn new(texid: u32, screen: [IVec2; 4], texture: [TexCoord; 4]) -> Self {
        Self {
            texid,
            screen,
            texture,
        }
    }

    /// Axis-aligned rectangle at `(x, y)` sampling the same-sized texel area at `(u, v)`.
    pub fn rect(texid: u32, x: i32, y: i32, w: i32, h: i32, u: u16, v: u16) -> Self {
        let (tw, th) = (w.clamp(0, u16::MAX as i32) as u16, h.clamp(0, u16::MAX as i32) as u16);
        Self {
            texid,
            screen: [
                IVec2::new(x, y),
                IVec2::new(x + w, y),
                IVec2::new(x + w, y + h),
                IVec2::new(x, y + h),
            ],
            texture: [
                TexCoord::new(u, v),
                TexCoord::new(u.saturating_add(tw), v),
                TexCoord::new(u.saturating_add(tw), v.saturating_add(th)),
                TexCoord::new(u, v.saturating_add(th)),
            ],
        }
    }
}

/// A picture asset: an ordered list of textured rectangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackPicture {
    pub faces: Vec<PictureFace>,
}

impl PackPicture {
    pub fn new(faces: Vec<PictureFace>) -> Self {
        Self { faces }
    }
}

/// A textured convex polygon with `n >= 3` vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonFace {
    texid: u32,
    screen: Vec<IVec2>,
    texture: Vec<TexCoord>,
}

impl PolygonFace {
    /// Build a face, validating the vertex count and coordinate pairing.
    pub fn new(texid: u32, screen: Vec<IVec2>, texture: Vec<TexCoord>) -> SceneResult<Self> {
        if screen.len() != texture.len() {
            return Err(SceneError::CoordinateCountMismatch {
                screen: screen.len(),
                texture: texture.len(),
            });
        }
        if screen.len() < 3 {
            return Err(SceneError::TooFewVertices {
                vertices: screen.len(),
            });
        }
        Ok(Self {
            texid,
            screen,
            texture,
        })
    }

    pub fn texid(&self) -> u32 {
        self.texid
    }

    /// Number of vertices (always at least 3).
    pub fn vertex_count(&self) -> usize {
        self.screen.len()
    }

    pub fn screen(&self) -> &[IVec2] {
        &self.screen
    }

    pub fn texture(&self) -> &[TexCoord] {
        &self.texture
    }

    /// Iterate `(screen, texture)` vertex pairs in order.
    pub fn vertices(&self) -> impl Iterator<Item = (IVec2, TexCoord)> + '_ {
        self.screen.iter().copied().zip(self.texture.iter().copied())
    }
}

/// A polygon asset: an ordered list of polygon faces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackPolygon {
    pub faces: Vec<PolygonFace>,
}

impl PackPolygon {
    pub fn new(faces: Vec<PolygonFace>) -> Self {
        Self { faces }
    }
}

/// One placed child inside an animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackPart {
    /// Index into the owning sprite's child slots.
    pub component_id: usize,
    pub trans: SpriteTrans,
}

impl PackPart {
    pub fn new(component_id: usize, trans: SpriteTrans) -> Self {
        Self {
            component_id,
            trans,
        }
    }
}

/// The parts drawn for one frame, back to front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackFrame {
    pub parts: Vec<PackPart>,
}

impl PackFrame {
    pub fn new(parts: Vec<PackPart>) -> Self {
        Self { parts }
    }
}

/// An animation asset: the frame table shared by every action of the animation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackAnimation {
    pub frames: Vec<PackFrame>,
    /// Number of child slots instances of this animation carry.
    pub component_count: usize,
}

impl PackAnimation {
    /// Build an animation; the slot count covers every referenced component.
    pub fn new(frames: Vec<PackFrame>) -> Self {
        let component_count = frames
            .iter()
            .flat_map(|frame| frame.parts.iter())
            .map(|part| part.component_id + 1)
            .max()
            .unwrap_or(0);
        Self {
            frames,
            component_count,
        }
    }

    pub fn frame(&self, index: usize) -> Option<&PackFrame> {
        self.frames.get(index)
    }
}
