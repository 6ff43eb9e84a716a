//! GPU vertex format for batched sprite quads.
//!
//! # Memory Layout
//!
//! ```text
//! Vertex (16 bytes)
//! Offset | Field  | Format
//! -------|--------|-----------
//! 0      | vx, vy | Sint32x2   screen position in pixels
//! 8      | tx, ty | Uint16x2   texel position
//! 12     | rgba   | Unorm8x4   vertex color
//!
//! Quad = 4 x Vertex = 64 bytes
//! ```

use bytemuck::{Pod, Zeroable};
use spritebatch_core::math::IVec2;
use spritebatch_scene::TexCoord;

/// Position and texture coordinate of one corner, before coloring.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct VertexPack {
    pub vx: i32,
    pub vy: i32,
    pub tx: u16,
    pub ty: u16,
}

impl VertexPack {
    pub fn new(screen: IVec2, texture: TexCoord) -> Self {
        Self {
            vx: screen.x,
            vy: screen.y,
            tx: texture.u,
            ty: texture.v,
        }
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.vx, self.vy)
    }
}

/// A colored vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub vp: VertexPack,
    pub rgba: [u8; 4],
}

impl Vertex {
    /// Returns the wgpu vertex buffer layout for batched quads.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // location 0: screen position (ivec2)
            0 => Sint32x2,
            // location 1: texel position (uvec2)
            1 => Uint16x2,
            // location 2: color (vec4)
            2 => Unorm8x4,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

/// Four vertices drawn as one primitive. All corners share one color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Quad {
    pub p: [Vertex; 4],
}

static_assertions::assert_eq_size!(VertexPack, [u8; 12]);
static_assertions::assert_eq_size!(Vertex, [u8; 16]);
static_assertions::assert_eq_size!(Quad, [u8; 64]);

impl Quad {
    pub fn new(vb: &[VertexPack; 4], color: u32) -> Self {
        let rgba = decode_color(color);
        Self {
            p: (*vb).map(|vp| Vertex { vp, rgba }),
        }
    }
}

/// Split a packed ARGB color into the vertex byte order `[r, g, b, a]`.
#[inline]
pub fn decode_color(color: u32) -> [u8; 4] {
    [
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
        ((color >> 24) & 0xff) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_color_channel_order() {
        assert_eq!(decode_color(0xFF10_2030), [0x10, 0x20, 0x30, 0xFF]);
        assert_eq!(decode_color(0x0000_00FF), [0, 0, 0xFF, 0]);
    }

    #[test]
    fn test_quad_shares_color_across_corners() {
        let vb = [
            VertexPack::new(IVec2::new(0, 0), TexCoord::new(0, 0)),
            VertexPack::new(IVec2::new(1, 0), TexCoord::new(1, 0)),
            VertexPack::new(IVec2::new(1, 1), TexCoord::new(1, 1)),
            VertexPack::new(IVec2::new(0, 1), TexCoord::new(0, 1)),
        ];
        let quad = Quad::new(&vb, 0x8040_2010);
        for (vertex, vp) in quad.p.iter().zip(vb.iter()) {
            assert_eq!(vertex.vp, *vp);
            assert_eq!(vertex.rgba, [0x40, 0x20, 0x10, 0x80]);
        }
    }

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[2].offset, 12);
    }

    #[test]
    fn test_quad_bytes_layout() {
        let vb = [VertexPack::new(IVec2::new(-1, 2), TexCoord::new(3, 4)); 4];
        let quad = Quad::new(&vb, 0xFF00_0000);
        let bytes = bytemuck::bytes_of(&quad);
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[0..4], &(-1i32).to_ne_bytes());
        assert_eq!(&bytes[8..10], &3u16.to_ne_bytes());
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0xFF]);
    }
}
