/// GraphicsDevice trait - the seam to the native backend.
///
/// Everything substantive (allocation, upload, drawing, dispatch) happens
/// behind this trait. This crate only validates arguments, packages
/// commands, and hands them over; a backend failure is whatever the
/// implementation chooses to report, nothing more is observable here.

use std::sync::{Mutex, MutexGuard};
use crate::command::Command;
use crate::error::Result;
use crate::ids::RawHandle;
use crate::resource::BufferDesc;

/// Capability flags reported by a device implementation
#[derive(Debug, Clone, Copy)]
pub struct DeviceCaps {
    /// Instanced draws are available
    pub supports_instancing: bool,
    /// Compute dispatch is available
    pub supports_compute: bool,
    /// Maximum simultaneously bound color targets
    pub max_render_targets: u32,
}

impl Default for DeviceCaps {
    fn default() -> Self {
        Self {
            supports_instancing: true,
            supports_compute: true,
            max_render_targets: 8,
        }
    }
}

/// Native device interface
///
/// Implemented by backend crates; `MockDevice` implements it for tests.
/// Handles minted by one device are meaningless to any other.
pub trait GraphicsDevice: Send + Sync {
    /// Capability flags for this device
    fn caps(&self) -> DeviceCaps;

    /// Allocate a native buffer for an already-validated descriptor
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// The handle the device minted for the buffer
    fn create_buffer(&mut self, desc: &BufferDesc) -> Result<RawHandle>;

    /// Release a native buffer. Called exactly once per created handle.
    fn destroy_buffer(&mut self, handle: RawHandle);

    /// Upload bytes into a native buffer
    ///
    /// # Arguments
    ///
    /// * `handle` - Buffer to write
    /// * `offset` - Byte offset into the buffer
    /// * `data` - Bytes to write
    fn write_buffer(&mut self, handle: RawHandle, offset: u64, data: &[u8]) -> Result<()>;

    /// Execute a recorded command list
    fn execute(&mut self, commands: &[Command]) -> Result<()>;
}

/// Lock a shared device, absorbing poison.
///
/// Device operations stay available after another thread panicked while
/// holding the lock; the device state itself lives on the native side.
pub(crate) fn lock<'a>(
    device: &'a Mutex<dyn GraphicsDevice + 'static>,
) -> MutexGuard<'a, dyn GraphicsDevice + 'static> {
    match device.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
