/// Command module - recorded rendering commands and the command buffer

// Module declarations
pub mod command_buffer;

// Re-exports
pub use command_buffer::*;
