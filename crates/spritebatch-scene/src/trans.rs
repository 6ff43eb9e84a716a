//! Transform and color composition along the scene graph.

use spritebatch_core::math::Matrix;

/// Opaque white, the neutral element of [`color_mul`].
pub const COLOR_WHITE: u32 = 0xFFFF_FFFF;

/// A sprite's placement: optional matrix and packed ARGB color.
///
/// `mat == None` stands for the identity matrix and lets composition skip the
/// fixed-point multiply entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteTrans {
    pub mat: Option<Matrix>,
    pub color: u32,
}

impl Default for SpriteTrans {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SpriteTrans {
    pub const IDENTITY: SpriteTrans = SpriteTrans {
        mat: None,
        color: COLOR_WHITE,
    };

    pub const fn new(mat: Matrix, color: u32) -> Self {
        Self {
            mat: Some(mat),
            color,
        }
    }

    pub const fn from_matrix(mat: Matrix) -> Self {
        Self::new(mat, COLOR_WHITE)
    }

    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// The effective matrix, materialising identity for `None`.
    pub fn matrix(&self) -> Matrix {
        self.mat.unwrap_or(Matrix::IDENTITY)
    }
}

/// Multiply two packed colors channel by channel (`c1 * c2 / 255`).
pub fn color_mul(c1: u32, c2: u32) -> u32 {
    if c1 == COLOR_WHITE {
        return c2;
    }
    if c2 == COLOR_WHITE {
        return c1;
    }
    let channel = |shift: u32| {
        let a = (c1 >> shift) & 0xff;
        let b = (c2 >> shift) & 0xff;
        (a * b / 255) << shift
    };
    channel(24) | channel(16) | channel(8) | channel(0)
}

/// Compose a node's local placement with the placement inherited from its parent.
///
/// With no inherited placement the local one is returned unchanged. Matrices
/// combine so that `local` is applied first, then `inherited`.
pub fn compose(local: &SpriteTrans, inherited: Option<&SpriteTrans>) -> SpriteTrans {
    let Some(parent) = inherited else {
        return *local;
    };
    let mat = match (local.mat, parent.mat) {
        (None, mat) => mat,
        (mat, None) => mat,
        (Some(child), Some(parent)) => Some(child.then(&parent)),
    };
    SpriteTrans {
        mat,
        color: color_mul(local.color, parent.color),
    }
}
