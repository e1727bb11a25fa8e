/// RenderTargetIdentifier - one value that names a render target any of
/// four ways, for passing across the device boundary.
///
/// Callers reference targets through built-in slots, interned names,
/// concrete texture instances, or raw device handles. The device branches
/// on the reference kind to resolve the actual target; this layer only
/// guarantees the value is well-formed and comparable.

use std::hash::{Hash, Hasher};
use crate::ids::{InstanceId, NameId, RawHandle};
use crate::names;
use crate::resource::TextureKey;
use crate::target::{BuiltinRenderTarget, CubemapFace};

/// Multiplicative mixing constant for `hash_code`
const HASH_MIX: u64 = 23;

/// The four mutually exclusive ways of referencing a target.
///
/// Exactly one variant is active; constructors on
/// [`RenderTargetIdentifier`] are the only way in, so a kind can never be
/// mutated independently of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetReference {
    /// An implicit pipeline-stage target resolved by the device
    BuiltIn(BuiltinRenderTarget),
    /// A temporary target previously allocated under an interned name
    Named(NameId),
    /// A concrete texture object referenced by identity
    Instance(InstanceId),
    /// A raw device handle, bypassing the object model.
    /// Some backends need the owning instance as well to resolve it.
    Raw {
        ptr: RawHandle,
        owner: InstanceId,
    },
}

/// A reference to a render-target-like resource, without owning it.
///
/// Plain value type: constructed and copied freely, never fails, carries
/// no disposable resource. The texture or buffer it references is owned
/// elsewhere.
///
/// # Example
///
/// ```
/// use meridian_graphics::meridian::target::RenderTargetIdentifier;
///
/// let a = RenderTargetIdentifier::from_name("MyTempRT");
/// let b = RenderTargetIdentifier::from_name("MyTempRT");
/// assert_eq!(a, b); // same interned id both times
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetIdentifier {
    reference: TargetReference,
    mip_level: u32,
    cubemap_face: CubemapFace,
    depth_slice: u32,
}

impl RenderTargetIdentifier {
    /// Reference a built-in pipeline target
    pub fn from_builtin(target: BuiltinRenderTarget) -> Self {
        Self::with_reference(TargetReference::BuiltIn(target))
    }

    /// Reference a named temporary target, interning the name in the
    /// process-global table
    pub fn from_name(name: &str) -> Self {
        Self::with_reference(TargetReference::Named(names::intern(name)))
    }

    /// Reference a named temporary target by an already-interned id
    pub fn from_name_id(name: NameId) -> Self {
        Self::with_reference(TargetReference::Named(name))
    }

    /// Reference a texture by identity.
    ///
    /// A missing texture collapses to the built-in `None` sentinel rather
    /// than carrying a null instance.
    pub fn from_texture(texture: Option<TextureKey>) -> Self {
        match texture {
            Some(key) => Self::with_reference(TargetReference::Instance(key.into())),
            None => Self::from_builtin(BuiltinRenderTarget::None),
        }
    }

    /// Reference a target through a raw device handle and its owning
    /// instance id
    pub fn from_raw_handle(ptr: RawHandle, owner: InstanceId) -> Self {
        Self::with_reference(TargetReference::Raw { ptr, owner })
    }

    /// Copy this identifier with different mip/face/slice selectors,
    /// preserving the reference verbatim
    pub fn with_subresource(self, mip_level: u32, cubemap_face: CubemapFace, depth_slice: u32) -> Self {
        Self {
            reference: self.reference,
            mip_level,
            cubemap_face,
            depth_slice,
        }
    }

    fn with_reference(reference: TargetReference) -> Self {
        Self {
            reference,
            mip_level: 0,
            cubemap_face: CubemapFace::Unknown,
            depth_slice: 0,
        }
    }

    // ===== ACCESSORS =====

    /// The active reference kind and its payload
    pub fn reference(&self) -> TargetReference {
        self.reference
    }

    /// Selected mip level (default 0)
    pub fn mip_level(&self) -> u32 {
        self.mip_level
    }

    /// Selected cubemap face (default `Unknown`)
    pub fn cubemap_face(&self) -> CubemapFace {
        self.cubemap_face
    }

    /// Selected depth/array slice (default 0)
    pub fn depth_slice(&self) -> u32 {
        self.depth_slice
    }

    // ===== HASHING =====

    /// In-process hash over (kind, payload, instance):
    /// `(kind * C + payload) * C + instance` with odd constant C.
    ///
    /// Not persisted anywhere; equal identifiers always agree on it.
    pub fn hash_code(&self) -> u64 {
        let (kind, payload, instance) = self.hash_fields();
        kind.wrapping_mul(HASH_MIX)
            .wrapping_add(payload)
            .wrapping_mul(HASH_MIX)
            .wrapping_add(instance)
    }

    fn hash_fields(&self) -> (u64, u64, u64) {
        match self.reference {
            TargetReference::BuiltIn(target) => (0, target.value() as u64, 0),
            TargetReference::Named(name) => (1, name.value() as u64, 0),
            TargetReference::Instance(instance) => (2, 0, instance.value()),
            TargetReference::Raw { ptr, owner } => (3, ptr.value(), owner.value()),
        }
    }
}

impl Hash for RenderTargetIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl Default for RenderTargetIdentifier {
    fn default() -> Self {
        Self::from_builtin(BuiltinRenderTarget::None)
    }
}

// ===== CONVERSIONS =====

impl From<BuiltinRenderTarget> for RenderTargetIdentifier {
    fn from(target: BuiltinRenderTarget) -> Self {
        Self::from_builtin(target)
    }
}

impl From<&str> for RenderTargetIdentifier {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<NameId> for RenderTargetIdentifier {
    fn from(name: NameId) -> Self {
        Self::from_name_id(name)
    }
}

impl From<TextureKey> for RenderTargetIdentifier {
    fn from(key: TextureKey) -> Self {
        Self::from_texture(Some(key))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;
