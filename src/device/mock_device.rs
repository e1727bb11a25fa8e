/// Mock device for unit tests (no GPU required)
///
/// Records every call so tests can assert on buffer lifecycles and
/// executed command lists without a real backend.

use crate::command::Command;
use crate::device::{DeviceCaps, GraphicsDevice};
use crate::error::Result;
use crate::ids::RawHandle;
use crate::resource::BufferDesc;

/// A single recorded buffer write
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub handle: RawHandle,
    pub offset: u64,
    pub data: Vec<u8>,
}

/// Recording device backend
pub struct MockDevice {
    caps: DeviceCaps,
    next_handle: u64,
    live_buffers: Vec<RawHandle>,
    destroyed_buffers: Vec<RawHandle>,
    writes: Vec<RecordedWrite>,
    executed: Vec<Command>,
}

impl MockDevice {
    /// Mock with default capabilities (everything supported)
    pub fn new() -> Self {
        Self::with_caps(DeviceCaps::default())
    }

    /// Mock with explicit capabilities, for capability-gating tests
    pub fn with_caps(caps: DeviceCaps) -> Self {
        Self {
            caps,
            next_handle: 1,
            live_buffers: Vec::new(),
            destroyed_buffers: Vec::new(),
            writes: Vec::new(),
            executed: Vec::new(),
        }
    }

    /// Handles created and not yet destroyed
    pub fn live_buffer_count(&self) -> usize {
        self.live_buffers.len()
    }

    /// Handles destroyed so far, in destruction order
    pub fn destroyed_buffers(&self) -> &[RawHandle] {
        &self.destroyed_buffers
    }

    /// Recorded writes, in call order
    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }

    /// Commands received through `execute`, in submission order
    pub fn executed(&self) -> &[Command] {
        &self.executed
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockDevice {
    fn caps(&self) -> DeviceCaps {
        self.caps
    }

    fn create_buffer(&mut self, _desc: &BufferDesc) -> Result<RawHandle> {
        let handle = RawHandle::new(self.next_handle);
        self.next_handle += 1;
        self.live_buffers.push(handle);
        Ok(handle)
    }

    fn destroy_buffer(&mut self, handle: RawHandle) {
        self.live_buffers.retain(|h| *h != handle);
        self.destroyed_buffers.push(handle);
    }

    fn write_buffer(&mut self, handle: RawHandle, offset: u64, data: &[u8]) -> Result<()> {
        self.writes.push(RecordedWrite {
            handle,
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn execute(&mut self, commands: &[Command]) -> Result<()> {
        self.executed.extend_from_slice(commands);
        Ok(())
    }
}
