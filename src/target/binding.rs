/// RenderTargetBinding - a full attachment set for a render pass.
///
/// Groups one to eight color targets with a depth target and the
/// load/store actions the device applies when the binding becomes active.

use crate::error::Result;
use crate::engine_bail;
use crate::target::RenderTargetIdentifier;

/// Maximum number of simultaneously bound color targets.
/// Matches the native device limit.
pub const MAX_COLOR_TARGETS: usize = 8;

/// What the device does with existing target contents when binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LoadAction {
    /// Preserve existing contents
    Load = 0,
    /// Clear on bind
    Clear = 1,
    /// Contents undefined; cheapest on tiled hardware
    DontCare = 2,
}

/// What the device does with rendered contents when unbinding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StoreAction {
    /// Write results back to the target
    Store = 0,
    /// MSAA resolve only
    Resolve = 1,
    /// Write back and resolve
    StoreAndResolve = 2,
    /// Discard results
    DontCare = 3,
}

/// A validated color+depth attachment set
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetBinding {
    color: Vec<RenderTargetIdentifier>,
    depth: RenderTargetIdentifier,
    color_load: LoadAction,
    color_store: StoreAction,
    depth_load: LoadAction,
    depth_store: StoreAction,
}

impl RenderTargetBinding {
    /// Bind one color target with a depth target, default actions
    /// (load everything, store everything)
    pub fn single(color: RenderTargetIdentifier, depth: RenderTargetIdentifier) -> Self {
        Self {
            color: vec![color],
            depth,
            color_load: LoadAction::Load,
            color_store: StoreAction::Store,
            depth_load: LoadAction::Load,
            depth_store: StoreAction::Store,
        }
    }

    /// Bind multiple color targets (MRT) with a depth target
    ///
    /// # Errors
    ///
    /// Returns an error if `color` is empty or holds more than
    /// [`MAX_COLOR_TARGETS`] identifiers.
    pub fn new(
        color: Vec<RenderTargetIdentifier>,
        depth: RenderTargetIdentifier,
        color_load: LoadAction,
        color_store: StoreAction,
        depth_load: LoadAction,
        depth_store: StoreAction,
    ) -> Result<Self> {
        if color.is_empty() {
            engine_bail!("meridian::RenderTargetBinding",
                "Binding must have at least one color target");
        }
        if color.len() > MAX_COLOR_TARGETS {
            engine_bail!("meridian::RenderTargetBinding",
                "Binding has {} color targets (maximum is {})",
                color.len(), MAX_COLOR_TARGETS);
        }

        Ok(Self {
            color,
            depth,
            color_load,
            color_store,
            depth_load,
            depth_store,
        })
    }

    // ===== ACCESSORS =====

    /// Bound color targets, in attachment order
    pub fn color(&self) -> &[RenderTargetIdentifier] {
        &self.color
    }

    /// Bound depth target
    pub fn depth(&self) -> RenderTargetIdentifier {
        self.depth
    }

    /// Load action for all color targets
    pub fn color_load(&self) -> LoadAction {
        self.color_load
    }

    /// Store action for all color targets
    pub fn color_store(&self) -> StoreAction {
        self.color_store
    }

    /// Load action for the depth target
    pub fn depth_load(&self) -> LoadAction {
        self.depth_load
    }

    /// Store action for the depth target
    pub fn depth_store(&self) -> StoreAction {
        self.depth_store
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
