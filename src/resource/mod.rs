/// Resource module - managed-side records for device-owned resources

// Module declarations
pub mod texture;
pub mod mesh;
pub mod registry;
pub mod buffer;

// Re-exports
pub use texture::*;
pub use mesh::*;
pub use registry::*;
pub use buffer::*;
