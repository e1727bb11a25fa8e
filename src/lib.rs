/*!
# Meridian Graphics

Managed-side binding layer for the Meridian rendering device.

This crate is the scripting-facing surface of a native graphics backend:
it validates arguments, interns names, records command lists, and keeps
managed records for device-owned resources. Every substantive operation
(allocation, upload, drawing, dispatch) happens behind the `GraphicsDevice`
trait; backend implementations are provided by separate crates.

## Architecture

- **Engine**: singleton manager for the device and resource registry
- **GraphicsDevice**: the trait seam to the native backend
- **RenderTargetIdentifier**: one value naming a render target four ways
- **NameRegistry**: process-global string-to-id interning
- **GraphicsBuffer**: validated, RAII-owned native buffer wrapper
- **CommandBuffer**: validated command recording for later execution
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod ids;
pub mod names;
pub mod device;
pub mod target;
pub mod resource;
pub mod command;

// Main meridian namespace module
pub mod meridian {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Identifier newtypes
    pub mod ids {
        pub use crate::ids::*;
    }

    // Name interning
    pub mod names {
        pub use crate::names::*;
    }

    // Device boundary
    pub mod device {
        pub use crate::device::*;
    }

    // Render target references
    pub mod target {
        pub use crate::target::*;
    }

    // Resource records and buffers
    pub mod resource {
        pub use crate::resource::*;
    }

    // Command recording
    pub mod command {
        pub use crate::command::*;
    }
}

// Re-export math library at crate root
pub use glam;
