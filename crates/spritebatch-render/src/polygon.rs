//! Fan quadrangulation of convex polygons.
//!
//! The batch only knows 4-vertex primitives. An `n`-gon is emitted as a fan
//! of quads anchored at vertex 0, each quad advancing two polygon vertices:
//!
//! ```text
//! [V0, V1, V2, V3], [V0, V3, V4, V5], [V0, V5, V6, V7], ...
//! ```
//!
//! Indices past the last vertex are clamped to it, so the final quad repeats
//! the last vertex and degenerates into a triangle when needed. Concave
//! polygons are not rejected; their fans may overlap.

use crate::buffer::RenderBuffer;
use crate::error::BatchResult;
use crate::vertex::VertexPack;

/// Iterator over the vertex indices of each fan quad.
#[derive(Debug, Clone)]
pub struct FanQuads {
    next: usize,
    last: usize,
    remaining: bool,
}

impl Iterator for FanQuads {
    type Item = [usize; 4];

    fn next(&mut self) -> Option<Self::Item> {
        if !self.remaining {
            return None;
        }
        let i = self.next;
        let clamp = |offset: usize| (i + offset).min(self.last);
        let quad = [0, clamp(1), clamp(2), clamp(3)];
        self.next += 2;
        self.remaining = self.next + 1 < self.last;
        Some(quad)
    }
}

/// Fan quads for a polygon with `vertex_count` vertices.
///
/// Any non-empty polygon produces at least one quad; a polygon with `n >= 3`
/// vertices produces `ceil((n - 2) / 2)`.
pub fn fan_quads(vertex_count: usize) -> FanQuads {
    FanQuads {
        next: 0,
        last: vertex_count.saturating_sub(1),
        remaining: vertex_count > 0,
    }
}

/// Append `vertices` to `rb` as a quad fan colored with `color`.
///
/// Stops at the first append that reports [`Full`](crate::BatchError::Full);
/// the caller owns rollback.
pub fn add_polygon(rb: &mut RenderBuffer, vertices: &[VertexPack], color: u32) -> BatchResult {
    for indices in fan_quads(vertices.len()) {
        let quad = indices.map(|index| vertices[index]);
        rb.append(&quad, color)?;
    }
    Ok(())
}
