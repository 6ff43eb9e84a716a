//! Sprite nodes.

use std::cell::Cell;
use std::sync::Arc;

use spritebatch_core::math::Matrix;

use crate::error::{SceneError, SceneResult};
use crate::pack::{PackAnimation, PackFrame, PackPicture, PackPolygon};
use crate::trans::SpriteTrans;

/// A node of the scene graph.
///
/// Every node has a local placement, a visibility flag and a frame counter;
/// what it draws is decided by its [`SpriteKind`].
#[derive(Debug, Clone)]
pub struct Sprite {
    pub trans: SpriteTrans,
    pub visible: bool,
    /// Current frame; may be negative or run past the action length, it is
    /// wrapped when the frame is resolved.
    pub frame: i32,
    kind: SpriteKind,
}

/// The closed set of node kinds.
#[derive(Debug, Clone)]
pub enum SpriteKind {
    /// Placeholder with nothing to draw.
    Empty,
    Picture(Arc<PackPicture>),
    Polygon(Arc<PackPolygon>),
    Animation(AnimationSprite),
    Label(LabelSprite),
    Anchor(AnchorSprite),
    Panel(PanelSprite),
}

impl SpriteKind {
    pub fn name(&self) -> &'static str {
        match self {
            SpriteKind::Empty => "empty",
            SpriteKind::Picture(_) => "picture",
            SpriteKind::Polygon(_) => "polygon",
            SpriteKind::Animation(_) => "animation",
            SpriteKind::Label(_) => "label",
            SpriteKind::Anchor(_) => "anchor",
            SpriteKind::Panel(_) => "panel",
        }
    }
}

impl Sprite {
    fn with_kind(kind: SpriteKind) -> Self {
        Self {
            trans: SpriteTrans::IDENTITY,
            visible: true,
            frame: 0,
            kind,
        }
    }

    pub fn empty() -> Self {
        Self::with_kind(SpriteKind::Empty)
    }

    pub fn picture(pack: Arc<PackPicture>) -> Self {
        Self::with_kind(SpriteKind::Picture(pack))
    }

    pub fn polygon(pack: Arc<PackPolygon>) -> Self {
        Self::with_kind(SpriteKind::Polygon(pack))
    }

    pub fn animation(pack: Arc<PackAnimation>) -> Self {
        Self::with_kind(SpriteKind::Animation(AnimationSprite::new(pack)))
    }

    pub fn label(rich_text: bool) -> Self {
        Self::with_kind(SpriteKind::Label(LabelSprite { rich_text }))
    }

    /// An anchor; `has_surface` marks a dependent pre-rendered surface.
    pub fn anchor(has_surface: bool) -> Self {
        Self::with_kind(SpriteKind::Anchor(AnchorSprite::new(has_surface)))
    }

    pub fn panel(scissor: bool) -> Self {
        Self::with_kind(SpriteKind::Panel(PanelSprite { scissor }))
    }

    pub fn with_trans(mut self, trans: SpriteTrans) -> Self {
        self.trans = trans;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_frame(mut self, frame: i32) -> Self {
        self.frame = frame;
        self
    }

    pub fn kind(&self) -> &SpriteKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut SpriteKind {
        &mut self.kind
    }

    pub fn as_animation(&self) -> Option<&AnimationSprite> {
        match &self.kind {
            SpriteKind::Animation(ani) => Some(ani),
            _ => None,
        }
    }

    pub fn as_animation_mut(&mut self) -> Option<&mut AnimationSprite> {
        match &mut self.kind {
            SpriteKind::Animation(ani) => Some(ani),
            _ => None,
        }
    }

    pub fn as_anchor(&self) -> Option<&AnchorSprite> {
        match &self.kind {
            SpriteKind::Anchor(anchor) => Some(anchor),
            _ => None,
        }
    }
}

/// An animation instance: shared frame table plus owned child slots.
#[derive(Debug, Clone)]
pub struct AnimationSprite {
    pack: Arc<PackAnimation>,
    start_frame: usize,
    total_frame: usize,
    children: Vec<Option<Sprite>>,
}

impl AnimationSprite {
    /// Instance playing every frame of `pack`, with all child slots empty.
    pub fn new(pack: Arc<PackAnimation>) -> Self {
        let total_frame = pack.frames.len();
        let children = vec![None; pack.component_count];
        Self {
            pack,
            start_frame: 0,
            total_frame,
            children,
        }
    }

    pub fn pack(&self) -> &Arc<PackAnimation> {
        &self.pack
    }

    /// Select the action spanning `total_frame` frames from `start_frame`.
    pub fn set_action(&mut self, start_frame: usize, total_frame: usize) {
        if start_frame.saturating_add(total_frame) > self.pack.frames.len() {
            tracing::warn!(
                "Action {}..{} runs past the {} packed frames",
                start_frame,
                start_frame.saturating_add(total_frame),
                self.pack.frames.len()
            );
        }
        self.start_frame = start_frame;
        self.total_frame = total_frame;
    }

    pub fn start_frame(&self) -> usize {
        self.start_frame
    }

    pub fn total_frame(&self) -> usize {
        self.total_frame
    }

    /// Resolve a raw frame counter to an index into the frame table.
    ///
    /// The counter wraps into `0..total_frame` (negative counters wrap from
    /// the end) and is offset by `start_frame`. Returns `None` for an action
    /// with no frames or an offset that does not fit in `usize`.
    pub fn frame_index(&self, frame: i32) -> Option<usize> {
        let total = i64::try_from(self.total_frame).ok().filter(|t| *t > 0)?;
        let wrapped = i64::from(frame).rem_euclid(total) as usize;
        self.start_frame.checked_add(wrapped)
    }

    /// The frame the counter resolves to, if it exists in the table.
    pub fn current_frame(&self, frame: i32) -> Option<&PackFrame> {
        self.frame_index(frame)
            .and_then(|index| self.pack.frame(index))
    }

    /// Place `child` in `slot`, returning the previous occupant.
    pub fn mount(&mut self, slot: usize, child: Option<Sprite>) -> SceneResult<Option<Sprite>> {
        let slots = self.children.len();
        let entry = self
            .children
            .get_mut(slot)
            .ok_or(SceneError::ComponentOutOfRange {
                component_id: slot,
                slots,
            })?;
        tracing::trace!("Mounted child in slot {} of {}", slot, slots);
        Ok(std::mem::replace(entry, child))
    }

    /// Child in `slot`; `None` when the slot is empty or out of range.
    pub fn child(&self, slot: usize) -> Option<&Sprite> {
        self.children.get(slot).and_then(Option::as_ref)
    }

    pub fn child_mut(&mut self, slot: usize) -> Option<&mut Sprite> {
        self.children.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn slot_count(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSprite {
    pub rich_text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSprite {
    pub scissor: bool,
}

/// A named attachment point.
///
/// Batching records the anchor's effective matrix here so later queries (hit
/// testing, attaching effects) can read it without walking the tree again.
#[derive(Debug, Clone)]
pub struct AnchorSprite {
    matrix: Cell<Matrix>,
    has_surface: bool,
}

impl AnchorSprite {
    pub fn new(has_surface: bool) -> Self {
        Self {
            matrix: Cell::new(Matrix::IDENTITY),
            has_surface,
        }
    }

    /// Whether a pre-rendered surface hangs off this anchor.
    pub fn has_surface(&self) -> bool {
        self.has_surface
    }

    /// The matrix recorded by the last traversal.
    pub fn matrix(&self) -> Matrix {
        self.matrix.get()
    }

    pub fn update(&self, matrix: Matrix) {
        self.matrix.set(matrix);
    }
}
