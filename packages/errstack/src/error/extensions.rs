//! Extension traits for `Result` and `Option`

use super::types::{Container, Error, Message, Original, Result};
use std::sync::Arc;

/// Annotate the error side of a `Result` in place
pub trait ResultExt<T> {
    /// Annotate the error, see [`crate::annotate()`]
    ///
    /// # Errors
    ///
    /// Returns the annotated error if `self` is `Err`.
    fn annotate(self, annotation: impl Into<String>) -> Result<T>;

    /// Annotate the error with lazily built text
    ///
    /// # Errors
    ///
    /// Returns the annotated error if `self` is `Err`.
    fn annotate_with<S, F>(self, annotation: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S;

    /// Give the error a stack, see [`crate::add_stack()`]
    ///
    /// # Errors
    ///
    /// Returns the error, now carrying a stack, if `self` is `Err`.
    fn add_stack(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[inline(never)]
    fn annotate(self, annotation: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err).annotate_at(annotation.into(), 1)),
        }
    }

    #[inline(never)]
    fn annotate_with<S, F>(self, annotation: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err).annotate_at(annotation().into(), 1)),
        }
    }

    #[inline(never)]
    fn add_stack(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err).add_stack_at(1)),
        }
    }
}

/// Turn a missing value into an error with a stack
pub trait OptionExt<T> {
    /// Return the value, or a new error carrying `message`
    ///
    /// # Errors
    ///
    /// Returns a fresh error, see [`crate::new()`], if `self` is `None`.
    fn ok_or_err(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(never)]
    fn ok_or_err(self, message: impl Into<String>) -> Result<T> {
        match self {
            Some(value) => Ok(value),
            None => {
                let original: Original = Arc::new(Message(message.into()));
                Err(Error::Annotated(Container::assemble(original, Vec::new(), 1)))
            }
        }
    }
}
