//! Graphics context and real GPU upload tests.

use std::sync::Arc;

use spritebatch_core::math::IVec2;
use spritebatch_render::{
    GraphicsContext, GraphicsContextDescriptor, GraphicsError, RenderBufferConfig, VertexPack,
};
use spritebatch_scene::TexCoord;

#[test]
#[ignore] // Requires GPU - run with: cargo test --test context_tests -- --ignored
fn test_context_creation_sync() {
    match GraphicsContext::new_owned_sync() {
        Ok(ctx) => {
            assert_eq!(Arc::strong_count(&ctx), 1);
            assert!(ctx.max_quads() > 0);
            let config = RenderBufferConfig::default().with_max_combine(ctx.max_quads() + 1);
            let rb = ctx.render_buffer(config);
            assert_eq!(rb.capacity(), ctx.max_quads());
        }
        Err(e) => {
            println!("GPU not available: {:?}", e);
        }
    }
}

#[test]
#[ignore] // Requires GPU
fn test_upload_and_unload_on_device() {
    let Ok(ctx) = GraphicsContext::new_owned_sync() else {
        return;
    };

    let mut rb = ctx.render_buffer(RenderBufferConfig::default().with_max_combine(16));
    let vp = VertexPack::new(IVec2::new(1, 2), TexCoord::new(0, 0));
    rb.ensure_texture(3).unwrap();
    rb.append(&[vp; 4], 0xFFFF_FFFF).unwrap();

    rb.upload(ctx.as_ref());
    let buffer = rb.gpu_buffer().and_then(|b| b.as_wgpu()).unwrap();
    assert_eq!(buffer.size(), 16 * 64);

    // Re-uploading reuses the same allocation.
    rb.clear();
    rb.upload(ctx.as_ref());
    assert!(rb.is_uploaded());

    rb.unload(ctx.as_ref());
    assert!(!rb.is_uploaded());
}

#[test]
#[ignore] // Requires GPU
fn test_fallback_adapter_descriptor() {
    let descriptor = GraphicsContextDescriptor::new()
        .with_fallback_adapter()
        .with_label("fallback");
    // A missing software adapter is reported, not panicked on.
    if let Err(e) = pollster::block_on(GraphicsContext::new_owned_with_descriptor(descriptor)) {
        assert!(matches!(
            e,
            GraphicsError::NoAdapter(_) | GraphicsError::DeviceRequest(_)
        ));
    }
}

#[test]
fn test_graphics_error_display() {
    let err = GraphicsError::NoAdapter("none".to_string());
    assert_eq!(
        err.to_string(),
        "Failed to find a suitable GPU adapter: none"
    );
    let err = GraphicsError::DeviceRequest("lost".to_string());
    assert_eq!(err.to_string(), "Failed to create device: lost");
}

#[test]
fn test_default_descriptor() {
    let descriptor = GraphicsContextDescriptor::default();
    assert_eq!(descriptor.backends, wgpu::Backends::all());
    assert!(!descriptor.force_fallback_adapter);
    assert!(descriptor.label.is_none());
}
