//! Scene graph traversal into a [`RenderBuffer`].
//!
//! Sprites are visited depth-first. Each node composes its local placement
//! with the inherited one and dispatches on its kind. Geometry-bearing nodes
//! (pictures and polygons) are atomic with respect to texture changes: if a
//! face needs a texture the batch is not bound to, every quad the node already
//! appended is rolled back before the mismatch is reported. Siblings that were
//! already drawn are never undone.

use spritebatch_core::profiling::profile_function;
use spritebatch_scene::{
    AnimationSprite, PackPicture, PackPolygon, Sprite, SpriteKind, SpriteTrans, compose,
};

use crate::buffer::RenderBuffer;
use crate::error::{BatchError, BatchResult, Unbatchable};
use crate::polygon::add_polygon;
use crate::vertex::VertexPack;

/// Draw a root sprite into `rb`.
///
/// An invisible root contributes nothing and succeeds.
pub fn draw_sprite(rb: &mut RenderBuffer, sprite: &Sprite) -> BatchResult {
    profile_function!();
    if !sprite.visible {
        return Ok(());
    }
    draw(rb, sprite, None)
}

/// Draw `sprite` under the `inherited` placement of its parent.
pub fn draw(rb: &mut RenderBuffer, sprite: &Sprite, inherited: Option<&SpriteTrans>) -> BatchResult {
    let t = compose(&sprite.trans, inherited);
    match sprite.kind() {
        SpriteKind::Picture(picture) => draw_picture(rb, picture, &t),
        SpriteKind::Polygon(polygon) => draw_polygon(rb, polygon, &t),
        SpriteKind::Animation(ani) => draw_animation(rb, ani, sprite.frame, &t),
        SpriteKind::Label(label) => {
            if label.rich_text {
                return Err(Unbatchable::RichTextLabel.into());
            }
            Ok(())
        }
        SpriteKind::Anchor(anchor) => {
            if anchor.has_surface() {
                return Err(Unbatchable::PreRenderedAnchor.into());
            }
            anchor.update(t.matrix());
            Ok(())
        }
        SpriteKind::Panel(panel) => {
            if panel.scissor {
                return Err(Unbatchable::ScissorPanel.into());
            }
            Ok(())
        }
        SpriteKind::Empty => Err(Unbatchable::unsupported(sprite.kind()).into()),
    }
}

fn draw_picture(rb: &mut RenderBuffer, picture: &PackPicture, t: &SpriteTrans) -> BatchResult {
    let m = t.matrix();
    let object = rb.object();
    for face in &picture.faces {
        if let Err(err) = rb.ensure_texture(face.texid) {
            rb.rollback(object);
            return Err(err);
        }
        let vb: [VertexPack; 4] = std::array::from_fn(|j| {
            VertexPack::new(m.transform_point(face.screen[j]), face.texture[j])
        });
        // A full buffer keeps the faces already appended.
        rb.append(&vb, t.color)?;
    }
    Ok(())
}

fn draw_polygon(rb: &mut RenderBuffer, polygon: &PackPolygon, t: &SpriteTrans) -> BatchResult {
    let m = t.matrix();
    let object = rb.object();
    let mut vb = Vec::new();
    for face in &polygon.faces {
        if let Err(err) = rb.ensure_texture(face.texid()) {
            rb.rollback(object);
            return Err(err);
        }
        vb.clear();
        vb.extend(
            face.vertices()
                .map(|(screen, texture)| VertexPack::new(m.transform_point(screen), texture)),
        );
        // Polygons are all-or-nothing under both batch boundaries.
        if let Err(err) = add_polygon(rb, &vb, t.color) {
            rb.rollback(object);
            return Err(err);
        }
    }
    Ok(())
}

fn draw_animation(
    rb: &mut RenderBuffer,
    ani: &AnimationSprite,
    frame: i32,
    t: &SpriteTrans,
) -> BatchResult {
    let Some(pf) = ani.current_frame(frame) else {
        tracing::warn!(
            "Animation frame {} does not resolve (start {}, total {}, {} frames)",
            frame,
            ani.start_frame(),
            ani.total_frame(),
            ani.pack().frames.len()
        );
        return Err(BatchError::Unbatchable(Unbatchable::InvalidFrame {
            frame,
            total_frame: ani.total_frame(),
            frame_count: ani.pack().frames.len(),
        }));
    };

    for part in &pf.parts {
        let Some(child) = ani.child(part.component_id) else {
            continue;
        };
        if !child.visible {
            continue;
        }
        let ct = compose(&part.trans, Some(t));
        draw(rb, child, Some(&ct))?;
    }
    Ok(())
}
