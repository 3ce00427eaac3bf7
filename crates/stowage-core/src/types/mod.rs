//! Core type definitions used across the Stowage workspace.

pub mod id;
pub mod window;

pub use id::*;
pub use window::Window;
