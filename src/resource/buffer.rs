/// GraphicsBuffer - managed wrapper over a device-owned buffer.
///
/// Validates arguments before any device call, uploads POD data, and tears
/// the native buffer down exactly once when dropped. The handle itself is
/// opaque; only the device can resolve it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use bitflags::bitflags;
use bytemuck::Pod;
use crate::error::Result;
use crate::engine_bail;
use crate::device::{self, GraphicsDevice};
use crate::ids::{InstanceId, RawHandle};
use crate::target::RenderTargetIdentifier;

bitflags! {
    /// How the buffer may be bound. Flag values match the native side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferTarget: u32 {
        /// Vertex buffer
        const VERTEX = 1;
        /// Index buffer (stride must be 2 or 4)
        const INDEX = 2;
        /// Source for copy operations
        const COPY_SOURCE = 4;
        /// Destination for copy operations
        const COPY_DESTINATION = 8;
        /// Structured buffer (stride must be a multiple of 4)
        const STRUCTURED = 16;
        /// Raw byte-address buffer
        const RAW = 32;
        /// Constant/uniform buffer
        const CONSTANT = 64;
    }
}

/// Descriptor for creating a graphics buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    /// Bind targets
    pub target: BufferTarget,
    /// Number of elements
    pub count: u32,
    /// Size of one element in bytes
    pub stride: u32,
}

impl BufferDesc {
    /// Total size in bytes
    pub fn size(&self) -> u64 {
        self.count as u64 * self.stride as u64
    }
}

/// Source of buffer instance identities.
/// Starts at 1 so `InstanceId::NONE` is never handed out.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Managed GPU buffer.
///
/// Construction validates the descriptor, then asks the device for the
/// native buffer. Dropping the value destroys the native buffer; there is
/// no other teardown path, so teardown runs exactly once.
pub struct GraphicsBuffer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    handle: RawHandle,
    instance: InstanceId,
    target: BufferTarget,
    count: u32,
    stride: u32,
}

impl GraphicsBuffer {
    /// Create a buffer on the given device
    ///
    /// # Errors
    ///
    /// Rejects, before any device call:
    /// - `count == 0`
    /// - `stride == 0`
    /// - an `INDEX` target whose stride is not 2 or 4
    /// - a `STRUCTURED` target whose stride is not a multiple of 4
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, desc: BufferDesc) -> Result<Self> {
        if desc.count == 0 {
            engine_bail!("meridian::GraphicsBuffer",
                "Buffer must have at least one element");
        }
        if desc.stride == 0 {
            engine_bail!("meridian::GraphicsBuffer",
                "Buffer stride must be at least 1 byte");
        }
        if desc.target.contains(BufferTarget::INDEX) && desc.stride != 2 && desc.stride != 4 {
            engine_bail!("meridian::GraphicsBuffer",
                "Index buffer stride must be 2 or 4 bytes, got {}", desc.stride);
        }
        if desc.target.contains(BufferTarget::STRUCTURED) && desc.stride % 4 != 0 {
            engine_bail!("meridian::GraphicsBuffer",
                "Structured buffer stride must be a multiple of 4, got {}", desc.stride);
        }

        let handle = device::lock(&device).create_buffer(&desc)?;

        Ok(Self {
            device,
            handle,
            instance: InstanceId::new(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)),
            target: desc.target,
            count: desc.count,
            stride: desc.stride,
        })
    }

    // ===== ACCESSORS =====

    /// Bind targets
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Number of elements
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Size of one element in bytes
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Total size in bytes
    pub fn size(&self) -> u64 {
        self.count as u64 * self.stride as u64
    }

    /// Identity of this managed wrapper
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    /// Raw device handle
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// Reference this buffer as a render target, carrying the
    /// handle + owning instance pair the backend needs to resolve it
    pub fn target_identifier(&self) -> RenderTargetIdentifier {
        RenderTargetIdentifier::from_raw_handle(self.handle, self.instance)
    }

    // ===== DATA UPLOAD =====

    /// Upload a slice of POD elements starting at the beginning of the buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not fit in the buffer.
    pub fn set_data<T: Pod>(&self, data: &[T]) -> Result<()> {
        self.update_raw(0, bytemuck::cast_slice(data))
    }

    /// Upload raw bytes at an arbitrary byte offset
    ///
    /// # Errors
    ///
    /// Returns an error if the write would run past the end of the buffer.
    pub fn update_raw(&self, offset: u64, data: &[u8]) -> Result<()> {
        // checked_add: a huge offset must be rejected, not wrap around.
        let end = offset.checked_add(data.len() as u64);
        if end.map_or(true, |end| end > self.size()) {
            engine_bail!("meridian::GraphicsBuffer",
                "Write at offset {} with size {} exceeds buffer size {}",
                offset, data.len(), self.size());
        }
        device::lock(&self.device).write_buffer(self.handle, offset, data)
    }
}

impl Drop for GraphicsBuffer {
    fn drop(&mut self) {
        // Teardown must run exactly once even if another thread panicked
        // while holding the device; surface that case instead of leaking.
        match self.device.lock() {
            Ok(mut device) => device.destroy_buffer(self.handle),
            Err(poisoned) => {
                crate::engine_warn!("meridian::GraphicsBuffer",
                    "Destroying buffer {} through a poisoned device lock",
                    self.handle.value());
                poisoned.into_inner().destroy_buffer(self.handle);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
