/// Device module - the boundary to the native graphics backend

// Module declarations
pub mod device;
#[cfg(test)]
pub mod mock_device;

// Re-exports
pub use device::*;
