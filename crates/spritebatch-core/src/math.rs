//! Fixed-point 2D affine math.
//!
//! Sprite geometry is positioned with integer matrices scaled by [`FIXED_SCALE`].
//! A [`Matrix`] `[a, b, c, d, e, f]` maps a point as:
//!
//! ```text
//! x' = (x * a + y * c) / S + e
//! y' = (x * b + y * d) / S + f
//! ```
//!
//! Division is integer division truncating toward zero, exactly like the asset
//! tools that produced the packed coordinates. Products are widened to `i64`
//! before dividing so large coordinates do not overflow mid-expression. Results
//! outside the `i32` range saturate to `i32::MIN`/`i32::MAX` instead of wrapping.
//!
//! # Examples
//!
//! ```
//! use spritebatch_core::math::{IVec2, Matrix};
//!
//! let m = Matrix::translate(10, -4);
//! assert_eq!(m.transform_point(IVec2::new(3, 3)), IVec2::new(13, -1));
//! ```

use bytemuck::{Pod, Zeroable};

pub use glam::IVec2;

/// Scale factor of the fixed-point matrix components. `FIXED_SCALE` is `1.0`.
pub const FIXED_SCALE: i32 = 1024;

/// A 2x3 fixed-point affine matrix.
///
/// # Memory Layout
///
/// ```text
/// Offset | Field     | Size
/// -------|-----------|------
/// 0      | m[0..4]   | 16 bytes (a, b, c, d)
/// 16     | m[4..6]   | 8 bytes  (e, f translation)
/// Total: 24 bytes
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Matrix {
    pub m: [i32; 6],
}

static_assertions::assert_eq_size!(Matrix, [i32; 6]);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        m: [FIXED_SCALE, 0, 0, FIXED_SCALE, 0, 0],
    };

    pub const fn new(m: [i32; 6]) -> Self {
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Pure translation by `(dx, dy)` pixels.
    pub const fn translate(dx: i32, dy: i32) -> Self {
        Self {
            m: [FIXED_SCALE, 0, 0, FIXED_SCALE, dx, dy],
        }
    }

    /// Axis scale where `sx`/`sy` are already fixed-point (`1024` = 1.0).
    pub const fn scale(sx: i32, sy: i32) -> Self {
        Self {
            m: [sx, 0, 0, sy, 0, 0],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform a point with this matrix.
    #[inline]
    pub fn transform_point(&self, p: IVec2) -> IVec2 {
        let [a, b, c, d, e, f] = self.m.map(i64::from);
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        let s = i64::from(FIXED_SCALE);
        IVec2::new(
            saturate((x * a + y * c) / s + e),
            saturate((x * b + y * d) / s + f),
        )
    }

    /// Returns the matrix that applies `self` first and `parent` afterwards.
    ///
    /// This is the composition used when a child node is placed inside its
    /// parent: the child's local matrix is expressed in the parent's space.
    pub fn then(&self, parent: &Matrix) -> Matrix {
        let m1 = self.m.map(i64::from);
        let m2 = parent.m.map(i64::from);
        let s = i64::from(FIXED_SCALE);
        let mut m = [0i64; 6];
        m[0] = (m1[0] * m2[0] + m1[1] * m2[2]) / s;
        m[1] = (m1[0] * m2[1] + m1[1] * m2[3]) / s;
        m[2] = (m1[2] * m2[0] + m1[3] * m2[2]) / s;
        m[3] = (m1[2] * m2[1] + m1[3] * m2[3]) / s;
        m[4] = (m1[4] * m2[0] + m1[5] * m2[2]) / s + m2[4];
        m[5] = (m1[4] * m2[1] + m1[5] * m2[3]) / s + m2[5];
        Matrix { m: m.map(saturate) }
    }
}

#[inline]
fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
