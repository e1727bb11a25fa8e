//! Identifier newtypes used across the scripting/native boundary.
//!
//! These are plain value wrappers: they carry no ownership and cross the
//! device boundary as raw integers. Uniqueness is the job of whoever mints
//! them (the name registry for `NameId`, the resource registry and buffer
//! constructor for `InstanceId`, the device for `RawHandle`).

/// Interned name id, minted by the global [`NameRegistry`](crate::names::NameRegistry).
///
/// The same string always maps to the same id within a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameId(u32);

impl NameId {
    /// Create a new id with the given value.
    ///
    /// Crate-visible only: the name registry is the sole minting authority,
    /// which is what keeps string-to-id interning idempotent.
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Underlying id value
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Opaque identity of a managed resource object.
///
/// Resolution back to the resource happens on the native side; this layer
/// only guarantees that two distinct live resources never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Sentinel meaning "no owning instance"
    pub const NONE: InstanceId = InstanceId(0);

    /// Create a new id with the given value.
    ///
    /// Callers are responsible for uniqueness among live resources.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Underlying id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A handle value minted by the native device.
///
/// Never dereferenced on this side of the boundary; paired with the owning
/// [`InstanceId`] where the backend needs both to resolve a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawHandle(u64);

impl RawHandle {
    /// Create a handle from a raw device value
    pub fn new(handle: u64) -> Self {
        Self(handle)
    }

    /// Underlying handle value
    pub fn value(&self) -> u64 {
        self.0
    }
}
