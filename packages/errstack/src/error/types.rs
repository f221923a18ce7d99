//! Core error types and definitions

use crate::stack::Stack;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Shared handle to the underlying error carried by an [`Error`]
pub type Original = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// An error that is either carried as-is or annotated with context and a stack
///
/// Cloning is cheap. Clones of an [`Error::Annotated`] share one container, so
/// an annotation added through any clone is visible through all of them.
#[derive(Clone)]
pub enum Error {
    /// A foreign error without annotations or a stack
    Plain(Original),
    /// An error carried in a container with annotations and a stack
    Annotated(Container),
}

/// Shared container holding the original error, its annotations and stack
#[derive(Clone)]
pub struct Container {
    pub(super) inner: Arc<ContainerInner>,
}

pub(super) struct ContainerInner {
    /// The error being carried, never an [`Error`] itself
    pub original: Original,
    /// Context annotations, outermost last
    pub annotations: RwLock<Vec<String>>,
    /// Stack captured when the container was created
    pub stack: Stack,
}

/// Error created from a bare message by [`crate::new()`] and friends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Message(pub(crate) String);

impl Message {
    /// The message text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result type alias using our Error
pub type Result<T, E = Error> = std::result::Result<T, E>;
