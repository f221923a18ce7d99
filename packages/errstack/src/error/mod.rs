//! Error handling with context propagation
//!
//! Provides the error container and everything that hangs off it:
//! - Plain errors upgraded to containers on demand
//! - Annotations shared by every handle to a container
//! - Stack capture and tree-style report rendering
//! - Extension traits and macros for `?`-friendly use
//! - `log`-based reporting helpers

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

// Re-export all public types and traits
pub use display::{Rendered, Style};
pub use extensions::{OptionExt, ResultExt};
pub use logging::Reporter;
pub use types::{Container, Error, Message, Original, Result};
