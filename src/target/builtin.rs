/// Built-in render target slots and cubemap face selectors.
///
/// These are closed vocabularies shared with the native device. Discriminant
/// values must match the native side; they cross the boundary as raw integers.

/// Implicit pipeline-stage targets the device resolves internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BuiltinRenderTarget {
    /// Sentinel: no target. Also what a missing texture reference collapses to.
    None = 0,
    /// Whatever target is currently bound
    CurrentActive = 1,
    /// The target the active camera renders to
    CameraTarget = 2,
    /// Camera depth target
    Depth = 3,
    /// Camera depth+normals target
    DepthNormals = 4,
    /// Resolved depth after MSAA resolve
    ResolvedDepth = 5,
    /// Deferred G-buffer slot 0 (albedo)
    GBuffer0 = 10,
    /// Deferred G-buffer slot 1 (specular)
    GBuffer1 = 11,
    /// Deferred G-buffer slot 2 (normals)
    GBuffer2 = 12,
    /// Deferred G-buffer slot 3 (emission)
    GBuffer3 = 13,
}

impl BuiltinRenderTarget {
    /// Raw value as passed to the device
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Cubemap face selector. `Unknown` means "not a cubemap" and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CubemapFace {
    /// No face / not a cubemap
    Unknown = -1,
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

impl CubemapFace {
    /// Raw value as passed to the device
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl Default for CubemapFace {
    fn default() -> Self {
        CubemapFace::Unknown
    }
}
