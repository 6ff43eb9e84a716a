//! End-to-end batching tests: scene graphs in, quads and GPU calls out.

use std::sync::Arc;

use spritebatch_core::math::{FIXED_SCALE, IVec2, Matrix};
use spritebatch_gpu::{BufferCall, MockBufferBackend};
use spritebatch_render::{BatchError, RenderBuffer, RenderBufferConfig, Unbatchable, draw_sprite};
use spritebatch_scene::{
    PackAnimation, PackFrame, PackPart, PackPicture, PackPolygon, PictureFace, PolygonFace,
    Sprite, SpriteTrans, TexCoord,
};

// ====================
// Helpers
// ====================

fn buffer(max_combine: usize) -> RenderBuffer {
    RenderBuffer::new(RenderBufferConfig::default().with_max_combine(max_combine))
}

fn tile(texid: u32, x: i32, y: i32) -> PictureFace {
    PictureFace::rect(texid, x, y, 8, 8, 0, 0)
}

fn picture(faces: Vec<PictureFace>) -> Sprite {
    Sprite::picture(Arc::new(PackPicture::new(faces)))
}

/// An animation with one frame placing each slot at `x = slot * 100`.
fn row_of(children: Vec<Option<Sprite>>) -> Sprite {
    let parts = (0..children.len())
        .map(|slot| {
            PackPart::new(
                slot,
                SpriteTrans::from_matrix(Matrix::translate(slot as i32 * 100, 0)),
            )
        })
        .collect();
    let mut root = Sprite::animation(Arc::new(PackAnimation::new(vec![PackFrame::new(parts)])));
    let ani = root.as_animation_mut().unwrap();
    for (slot, child) in children.into_iter().enumerate() {
        ani.mount(slot, child).unwrap();
    }
    root
}

// ====================
// Picture scenarios
// ====================

#[test]
fn test_picture_shared_texture_then_mismatch_discards_whole_picture() {
    let mut rb = buffer(16);

    let two = picture(vec![tile(7, 0, 0), tile(7, 8, 0)]);
    draw_sprite(&mut rb, &two).unwrap();
    assert_eq!(rb.object(), 2);
    assert_eq!(rb.texid(), 7);

    // Same picture with a third face on another texture, into a fresh batch.
    rb.clear();
    let three = picture(vec![tile(7, 0, 0), tile(7, 8, 0), tile(9, 16, 0)]);
    let err = draw_sprite(&mut rb, &three).unwrap_err();

    assert!(err.is_unbatchable());
    assert_eq!(err.code(), -1);
    assert_eq!(rb.object(), 0);
}

#[test]
fn test_color_reaches_every_vertex() {
    let sprite = picture(vec![tile(1, 0, 0)])
        .with_trans(SpriteTrans::IDENTITY.with_color(0xFF10_2030));
    let mut rb = buffer(4);
    draw_sprite(&mut rb, &sprite).unwrap();
    for vertex in &rb.quads()[0].p {
        assert_eq!(vertex.rgba, [0x10, 0x20, 0x30, 0xFF]);
    }
}

#[test]
fn test_invisible_root_leaves_buffer_untouched() {
    let mut rb = buffer(4);
    draw_sprite(&mut rb, &picture(vec![tile(1, 0, 0)])).unwrap();

    let hidden = picture(vec![tile(1, 0, 0), tile(1, 8, 0)]).with_visible(false);
    assert_eq!(draw_sprite(&mut rb, &hidden), Ok(()));
    assert_eq!(rb.object(), 1);
}

// ====================
// Animation scenarios
// ====================

#[test]
fn test_animation_places_children_and_skips_hidden_or_missing() {
    let root = row_of(vec![
        Some(picture(vec![tile(3, 0, 0)])),
        None,
        Some(picture(vec![tile(3, 0, 0)]).with_visible(false)),
        Some(picture(vec![tile(3, 0, 0)])),
    ]);
    let mut rb = buffer(16);
    draw_sprite(&mut rb, &root).unwrap();

    assert_eq!(rb.object(), 2);
    assert_eq!(rb.quads()[0].p[0].vp.position(), IVec2::new(0, 0));
    assert_eq!(rb.quads()[1].p[0].vp.position(), IVec2::new(300, 0));
}

#[test]
fn test_animation_frame_selection_wraps() {
    // Frame k places slot 0 at x = k.
    let frames = (0..16)
        .map(|k| {
            PackFrame::new(vec![PackPart::new(
                0,
                SpriteTrans::from_matrix(Matrix::translate(k, 0)),
            )])
        })
        .collect();
    let mut root = Sprite::animation(Arc::new(PackAnimation::new(frames)));
    {
        let ani = root.as_animation_mut().unwrap();
        ani.set_action(10, 4);
        ani.mount(0, Some(picture(vec![tile(1, 0, 0)]))).unwrap();
    }

    for (frame, expected_x) in [(-1, 13), (5, 11), (0, 10), (3, 13)] {
        root.frame = frame;
        let mut rb = buffer(4);
        draw_sprite(&mut rb, &root).unwrap();
        assert_eq!(
            rb.quads()[0].p[0].vp.vx,
            expected_x,
            "frame {} should resolve to index {}",
            frame,
            expected_x
        );
    }
}

#[test]
fn test_nested_transforms_compose_root_to_leaf() {
    let leaf = picture(vec![PictureFace::rect(1, 1, 1, 1, 1, 0, 0)])
        .with_trans(SpriteTrans::from_matrix(Matrix::translate(2, 0)));
    let middle = row_of(vec![Some(leaf)])
        .with_trans(SpriteTrans::from_matrix(Matrix::scale(FIXED_SCALE * 2, FIXED_SCALE * 2)));
    let root = row_of(vec![None, Some(middle)]).with_trans(SpriteTrans::new(
        Matrix::translate(0, 50),
        0x80FF_FFFF,
    ));

    let mut rb = buffer(4);
    draw_sprite(&mut rb, &root).unwrap();

    // leaf (1,1) -> +2 -> (3,1) -> x2 -> (6,2) -> slot 1 of root +100 -> (106,2) -> +50 y
    let quad = &rb.quads()[0];
    assert_eq!(quad.p[0].vp.position(), IVec2::new(106, 52));
    assert_eq!(quad.p[0].rgba[3], 0x80);
}

#[test]
fn test_animation_stops_at_first_failing_child_without_undoing_siblings() {
    let root = row_of(vec![
        Some(picture(vec![tile(4, 0, 0)])),
        Some(Sprite::label(true)),
        Some(picture(vec![tile(4, 0, 0)])),
    ]);
    let mut rb = buffer(16);
    let err = draw_sprite(&mut rb, &root).unwrap_err();

    assert_eq!(err, BatchError::Unbatchable(Unbatchable::RichTextLabel));
    assert_eq!(rb.object(), 1);
}

#[test]
fn test_child_texture_mismatch_rolls_back_only_that_child() {
    let root = row_of(vec![
        Some(picture(vec![tile(4, 0, 0), tile(4, 8, 0)])),
        Some(picture(vec![tile(4, 0, 0), tile(5, 8, 0)])),
    ]);
    let mut rb = buffer(16);
    let err = draw_sprite(&mut rb, &root).unwrap_err();

    assert_eq!(
        err,
        BatchError::TextureMismatch {
            bound: 4,
            requested: 5
        }
    );
    assert_eq!(rb.object(), 2);
}

// ====================
// Polygon scenarios
// ====================

#[test]
fn test_polygon_under_transform() {
    let face = PolygonFace::new(
        6,
        vec![
            IVec2::new(0, 0),
            IVec2::new(4, 0),
            IVec2::new(6, 4),
            IVec2::new(2, 8),
            IVec2::new(-2, 4),
        ],
        vec![TexCoord::new(0, 0); 5],
    )
    .unwrap();
    let sprite = Sprite::polygon(Arc::new(PackPolygon::new(vec![face])))
        .with_trans(SpriteTrans::from_matrix(Matrix::translate(10, 10)));

    let mut rb = buffer(8);
    draw_sprite(&mut rb, &sprite).unwrap();

    assert_eq!(rb.object(), 2);
    let second: Vec<IVec2> = rb.quads()[1].p.iter().map(|v| v.vp.position()).collect();
    assert_eq!(
        second,
        vec![
            IVec2::new(10, 10),
            IVec2::new(12, 18),
            IVec2::new(8, 14),
            IVec2::new(8, 14)
        ]
    );
}

// ====================
// Caller policy: flush and retry
// ====================

/// Draw every sprite, flushing on any boundary and retrying the failing node
/// once against an empty buffer. Returns `(texid, quads)` for every flushed batch.
fn flush_and_retry(
    sprites: &[Sprite],
    rb: &mut RenderBuffer,
    backend: &MockBufferBackend,
) -> Vec<(u32, usize)> {
    let mut batches = Vec::new();
    let flush = |rb: &mut RenderBuffer, batches: &mut Vec<(u32, usize)>| {
        if !rb.is_empty() {
            rb.upload(backend);
            batches.push((rb.texid(), rb.object()));
            rb.clear();
        }
    };

    for sprite in sprites {
        let before = rb.object();
        match draw_sprite(rb, sprite) {
            Ok(()) => {}
            Err(BatchError::Full) | Err(BatchError::TextureMismatch { .. }) => {
                // A picture keeps the faces that fit; drop them so the retry does not repeat them.
                rb.rollback(before);
                flush(rb, &mut batches);
                if let Err(BatchError::Full) = draw_sprite(rb, sprite) {
                    flush(rb, &mut batches);
                }
            }
            Err(BatchError::Unbatchable(_)) => flush(rb, &mut batches),
        }
    }
    flush(rb, &mut batches);
    batches
}

#[test]
fn test_flush_and_retry_policy_splits_by_texture() {
    let backend = MockBufferBackend::new();
    let mut rb = buffer(64);
    let sprites = vec![
        picture(vec![tile(1, 0, 0), tile(1, 8, 0)]),
        picture(vec![tile(1, 16, 0)]),
        picture(vec![tile(2, 0, 8), tile(2, 8, 8)]),
        picture(vec![tile(1, 0, 16)]),
    ];

    let batches = flush_and_retry(&sprites, &mut rb, &backend);

    assert_eq!(batches, vec![(1, 3), (2, 2), (1, 1)]);
    assert_eq!(backend.count_buffer_creates(), 1);
    assert_eq!(backend.count_uploads(), 3);

    rb.unload(&backend);
    rb.unload(&backend);
    assert_eq!(backend.live_buffers(), 0);
}

#[test]
fn test_flush_and_retry_on_full_emits_each_face_once() {
    let backend = MockBufferBackend::new();
    let mut rb = buffer(4);
    let sprites = vec![
        picture(vec![tile(1, 0, 0), tile(1, 8, 0), tile(1, 16, 0)]),
        picture(vec![tile(1, 0, 8), tile(1, 8, 8), tile(1, 16, 8)]),
    ];

    let batches = flush_and_retry(&sprites, &mut rb, &backend);

    assert_eq!(batches, vec![(1, 3), (1, 3)]);
    let total: usize = batches.iter().map(|(_, quads)| quads).sum();
    assert_eq!(total, 6);
    assert_eq!(backend.count_uploads(), 2);
    // The second batch holds the second picture only.
    let uploaded = backend.contents(0).unwrap();
    assert_eq!(uploaded.len(), 3 * 64);
    assert_eq!(&uploaded[4..8], &8i32.to_ne_bytes());
}

#[test]
fn test_upload_sends_exactly_the_batched_quads() {
    let backend = MockBufferBackend::new();
    let mut rb = buffer(32);
    let strip = picture(vec![tile(1, 0, 0), tile(1, 8, 0), tile(1, 16, 0)]);
    draw_sprite(&mut rb, &strip).unwrap();
    rb.upload(&backend);

    assert_eq!(
        backend.calls(),
        vec![
            BufferCall::CreateBuffer {
                size: 32 * 64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            },
            BufferCall::Bind { buffer_id: 0 },
            BufferCall::UploadData {
                buffer_id: 0,
                size: 3 * 64
            },
        ]
    );
    assert_eq!(backend.contents(0).unwrap(), rb.as_bytes());
}
