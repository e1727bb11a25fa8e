/// Target module - render target references and bindings

// Module declarations
pub mod builtin;
pub mod identifier;
pub mod binding;

// Re-exports
pub use builtin::*;
pub use identifier::*;
pub use binding::*;
