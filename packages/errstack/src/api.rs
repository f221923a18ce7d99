//! Free-function API over plain errors and containers
//!
//! Every function accepts `None` and hands it back untouched. Anything that
//! creates a container records the stack from the caller of that function.

use crate::error::constructors::same_original;
use crate::error::{Container, Error, Message, Original};
use std::fmt;
use std::sync::Arc;

/// Marker appended when a `Display` implementation fails mid-format
pub const FORMAT_ERROR_MARKER: &str = "%!(ERROR)";

/// Create an error with its own stack, starting at the caller
#[inline(never)]
#[must_use]
pub fn new(message: impl Into<String>) -> Error {
    let original: Original = Arc::new(Message(message.into()));
    Error::Annotated(Container::assemble(original, Vec::new(), 1))
}

/// Create an error from pre-formatted arguments, see [`crate::err!`]
#[inline(never)]
#[must_use]
pub fn new_fmt(args: fmt::Arguments<'_>) -> Error {
    let original: Original = Arc::new(Message(format_lossy(args)));
    Error::Annotated(Container::assemble(original, Vec::new(), 1))
}

/// Annotate an error with context
///
/// A plain error is moved into a new container with `annotation` as its only
/// annotation and a stack starting at the caller. A container gets the
/// annotation appended in place and is returned as-is, so every clone of it
/// sees the new annotation.
#[inline(never)]
#[must_use]
pub fn annotate<E>(err: Option<E>, annotation: impl Into<String>) -> Option<Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err {
        Some(err) => Some(Error::wrap(err).annotate_at(annotation.into(), 1)),
        None => None,
    }
}

/// [`annotate()`] with a formatted annotation, see [`crate::annotate!`]
#[inline(never)]
#[must_use]
pub fn annotate_fmt<E>(err: Option<E>, args: fmt::Arguments<'_>) -> Option<Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err {
        Some(err) => Some(Error::wrap(err).annotate_at(format_lossy(args), 1)),
        None => None,
    }
}

/// Give an error a stack starting at the caller
///
/// Containers already carry a stack and are returned unchanged.
#[inline(never)]
#[must_use]
pub fn add_stack<E>(err: Option<E>) -> Option<Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err {
        Some(err) => Some(Error::wrap(err).add_stack_at(1)),
        None => None,
    }
}

/// The original error behind any annotations and stack
#[must_use]
pub fn cause(err: Option<&Error>) -> Option<Original> {
    err.map(|err| Arc::clone(err.cause()))
}

/// Whether two errors carry the very same original error value
///
/// Compares identity, not messages: two errors created separately from the
/// same text are different.
#[must_use]
pub fn equals(a: Option<&Error>, b: Option<&Error>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_original(a.cause(), b.cause()),
        _ => false,
    }
}

/// Format `args`, embedding [`FORMAT_ERROR_MARKER`] instead of panicking
/// when a `Display` implementation reports an error.
pub(crate) fn format_lossy(args: fmt::Arguments<'_>) -> String {
    let mut text = String::new();
    if fmt::write(&mut text, args).is_err() {
        text.push_str(FORMAT_ERROR_MARKER);
    }
    text
}
