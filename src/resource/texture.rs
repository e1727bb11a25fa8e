/// Texture descriptor and managed texture record.
///
/// The actual pixel storage lives on the device; this side keeps the
/// descriptor and a stable identity so render-target references can name
/// the texture without owning it.

use slotmap::{new_key_type, Key};
use crate::ids::InstanceId;

new_key_type! {
    /// Registry key for a texture record
    pub struct TextureKey;
}

impl From<TextureKey> for InstanceId {
    fn from(key: TextureKey) -> Self {
        InstanceId::new(key.data().as_ffi())
    }
}

/// Pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    R16G16B16A16_FLOAT,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture can be used as render target
    RenderTarget,
    /// Texture can be used for both
    SampledAndRenderTarget,
    /// Texture can be used as depth/stencil attachment
    DepthStencil,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Number of array layers (1 = simple 2D texture, >1 = texture array)
    pub array_layers: u32,
    /// Number of mip levels (1 = no mip chain)
    pub mip_levels: u32,
}

impl TextureDesc {
    /// Descriptor for a plain sampleable color target
    pub fn color_target(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::SampledAndRenderTarget,
            array_layers: 1,
            mip_levels: 1,
        }
    }

    /// Descriptor for a depth attachment
    pub fn depth_target(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::D32_FLOAT,
            usage: TextureUsage::DepthStencil,
            array_layers: 1,
            mip_levels: 1,
        }
    }
}

/// Managed texture record.
///
/// Created only through `ResourceRegistry::create_texture()`, which assigns
/// the instance identity.
#[derive(Debug, Clone)]
pub struct Texture {
    desc: TextureDesc,
    instance: InstanceId,
}

impl Texture {
    pub(crate) fn new(desc: TextureDesc, instance: InstanceId) -> Self {
        Self { desc, instance }
    }

    /// Full descriptor
    pub fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.desc.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Stable identity for render-target references
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
