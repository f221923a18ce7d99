//! Annotated errors with captured call stacks
//!
//! This crate adds context to errors while preserving the original:
//! - [`new()`] and [`err!`] create an error with its own stack
//! - [`annotate()`] prefixes an error with context, upgrading foreign errors
//! - [`add_stack()`] records where a foreign error was first observed
//! - [`cause`] and [`equals`] see through all of it to the original error
//!
//! ```
//! use errstack::{OptionExt, Style};
//!
//! # fn main() -> errstack::Result<()> {
//! let err = errstack::new("whoops");
//! let err = errstack::annotate(Some(err), "oh no").ok_or_err("no error to annotate")?;
//!
//! assert_eq!(err.to_string(), "oh no: whoops");
//! assert_eq!(err.render(Style::Plain).to_string(), "whoops");
//! assert!(format!("{err:?}").starts_with("Error: oh no: whoops\n"));
//! # Ok(())
//! # }
//! ```
//!
//! Printing with `{:?}` (or `{:+}`) shows the stack as a tree:
//!
//! ```text
//! Error: oh no: whoops
//!   │
//!   ├─ (app::config::load)
//!   │     src/config.rs:12
//!   │
//!   └─ (app::main)
//!         src/main.rs:36
//! ```
//!
//! Containers are shared handles. Annotating one clone is visible through
//! every other clone, and a stack is only ever captured once per container.

#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod stack;

pub use api::{
    add_stack, annotate, annotate_fmt, cause, equals, new, new_fmt, FORMAT_ERROR_MARKER,
};
pub use error::*;
pub use stack::{Frame, Stack, MAX_FRAMES};
