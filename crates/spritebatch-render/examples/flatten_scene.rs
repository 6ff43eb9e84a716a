//! Flatten Scene: turn a small sprite tree into texture batches
//!
//! Builds a scene that mixes two texture atlases, a polygon, a rich-text label
//! and an anchor, then walks it the way a renderer would: batch until the
//! buffer reports a boundary, upload what was gathered, and retry.
//!
//! Uploads go to an in-memory backend, so no GPU is required:
//!   cargo run -p spritebatch-render --example flatten_scene
//!
//! Set `RUST_LOG=trace` to also see rollbacks.

use std::sync::Arc;

use spritebatch_core::logging;
use spritebatch_core::math::{IVec2, Matrix};
use spritebatch_core::profiling::{ProfilingBackend, init_profiling, new_frame, profile_scope};
use spritebatch_gpu::MockBufferBackend;
use spritebatch_render::{BatchError, RenderBuffer, RenderBufferConfig, draw_sprite};
use spritebatch_scene::{
    PackAnimation, PackFrame, PackPart, PackPicture, PackPolygon, PictureFace, PolygonFace,
    Sprite, SpriteTrans, TexCoord,
};

const HERO_ATLAS: u32 = 1;
const TERRAIN_ATLAS: u32 = 2;

fn hero() -> Sprite {
    let faces = vec![
        PictureFace::rect(HERO_ATLAS, -8, -16, 16, 16, 0, 0),
        PictureFace::rect(HERO_ATLAS, -8, 0, 16, 16, 0, 16),
    ];
    Sprite::picture(Arc::new(PackPicture::new(faces)))
}

fn hill() -> Sprite {
    let screen = vec![
        IVec2::new(0, 0),
        IVec2::new(64, 0),
        IVec2::new(80, -24),
        IVec2::new(48, -48),
        IVec2::new(16, -40),
        IVec2::new(-8, -20),
    ];
    let texture = screen
        .iter()
        .map(|p| TexCoord::new((p.x + 8) as u16, (p.y + 48) as u16))
        .collect();
    match PolygonFace::new(TERRAIN_ATLAS, screen, texture) {
        Ok(face) => Sprite::polygon(Arc::new(PackPolygon::new(vec![face]))),
        Err(e) => {
            tracing::error!("Bad hill outline: {}", e);
            Sprite::empty()
        }
    }
}

/// Each scene entry is a root the renderer draws in order.
fn build_scene() -> Vec<Sprite> {
    let party = Arc::new(PackAnimation::new(vec![PackFrame::new(
        (0..3)
            .map(|slot| {
                PackPart::new(
                    slot,
                    SpriteTrans::from_matrix(Matrix::translate(slot as i32 * 24, 0)),
                )
            })
            .collect(),
    )]));
    let mut group = Sprite::animation(party).with_trans(SpriteTrans::new(
        Matrix::translate(100, 200),
        0xFFFF_E0E0,
    ));
    if let Some(ani) = group.as_animation_mut() {
        for slot in 0..3 {
            if let Err(e) = ani.mount(slot, Some(hero())) {
                tracing::error!("Failed to mount party member {}: {}", slot, e);
            }
        }
    }

    vec![
        hill().with_trans(SpriteTrans::from_matrix(Matrix::translate(0, 240))),
        group,
        Sprite::label(true),
        hill().with_trans(SpriteTrans::from_matrix(Matrix::translate(160, 240))),
        Sprite::anchor(false).with_trans(SpriteTrans::from_matrix(Matrix::translate(12, 34))),
    ]
}

struct Flusher<'a> {
    backend: &'a MockBufferBackend,
    batches: usize,
}

impl Flusher<'_> {
    fn flush(&mut self, rb: &mut RenderBuffer) {
        if rb.is_empty() {
            return;
        }
        rb.upload(self.backend);
        tracing::info!(
            "Batch {}: {} quads on texture {}",
            self.batches,
            rb.object(),
            rb.texid()
        );
        self.batches += 1;
        rb.clear();
    }
}

fn main() {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);
    new_frame();

    let backend = MockBufferBackend::new();
    let mut rb = RenderBuffer::new(RenderBufferConfig::default().with_max_combine(4));
    let mut flusher = Flusher {
        backend: &backend,
        batches: 0,
    };

    let scene = build_scene();
    {
        profile_scope!("flatten");
        for sprite in &scene {
            let before = rb.object();
            match draw_sprite(&mut rb, sprite) {
                Ok(()) => {}
                Err(BatchError::Full) => {
                    // Drop this root's partial output so the redraw does not repeat it.
                    rb.rollback(before);
                    flusher.flush(&mut rb);
                    if let Err(e) = draw_sprite(&mut rb, sprite) {
                        tracing::warn!("Sprite still does not fit after flush: {}", e);
                    }
                }
                Err(BatchError::TextureMismatch { bound, requested }) => {
                    tracing::debug!("Texture switch {} -> {}", bound, requested);
                    flusher.flush(&mut rb);
                    if let Err(e) = draw_sprite(&mut rb, sprite) {
                        tracing::warn!("Sprite still does not batch after flush: {}", e);
                    }
                }
                Err(BatchError::Unbatchable(reason)) => {
                    tracing::info!("Handing {} to a dedicated renderer", reason);
                    flusher.flush(&mut rb);
                }
            }
        }
        flusher.flush(&mut rb);
    }

    rb.unload(&backend);
    tracing::info!(
        "{} batches, {} uploads, {} live GPU buffers",
        flusher.batches,
        backend.count_uploads(),
        backend.live_buffers()
    );
    new_frame();
}
