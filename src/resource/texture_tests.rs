use super::*;
use crate::resource::ResourceRegistry;

#[test]
fn test_color_target_defaults() {
    let desc = TextureDesc::color_target(1920, 1080);
    assert_eq!(desc.width, 1920);
    assert_eq!(desc.height, 1080);
    assert_eq!(desc.format, TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(desc.usage, TextureUsage::SampledAndRenderTarget);
    assert_eq!(desc.array_layers, 1);
    assert_eq!(desc.mip_levels, 1);
}

#[test]
fn test_depth_target_defaults() {
    let desc = TextureDesc::depth_target(512, 512);
    assert_eq!(desc.format, TextureFormat::D32_FLOAT);
    assert_eq!(desc.usage, TextureUsage::DepthStencil);
}

#[test]
fn test_instance_id_matches_key() {
    let mut registry = ResourceRegistry::new();
    let key = registry
        .create_texture(TextureDesc::color_target(32, 32))
        .unwrap();

    let texture = registry.texture(key).unwrap();
    assert_eq!(texture.instance_id(), crate::ids::InstanceId::from(key));
    assert_ne!(texture.instance_id(), crate::ids::InstanceId::NONE);
}

#[test]
fn test_distinct_textures_distinct_instances() {
    let mut registry = ResourceRegistry::new();
    let a = registry
        .create_texture(TextureDesc::color_target(32, 32))
        .unwrap();
    let b = registry
        .create_texture(TextureDesc::color_target(32, 32))
        .unwrap();

    let ia = registry.texture(a).unwrap().instance_id();
    let ib = registry.texture(b).unwrap().instance_id();
    assert_ne!(ia, ib);
}
