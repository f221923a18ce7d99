//! Error constructors and methods

use super::types::{Container, ContainerInner, Error, Original};
use crate::stack::Stack;
use std::sync::{Arc, PoisonError, RwLock};

impl Error {
    /// Convert any error into an [`Error`] without capturing a stack
    ///
    /// An [`Error`] passed through a generic parameter is recognised and
    /// returned unchanged, so containers never end up nested inside one
    /// another. Anything else becomes [`Error::Plain`].
    #[must_use]
    pub fn wrap<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Convert a boxed error, unwrapping it if it already is an [`Error`]
    #[must_use]
    pub fn from_boxed(error: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        match error.downcast::<Self>() {
            Ok(ours) => *ours,
            Err(foreign) => Self::Plain(Arc::from(foreign)),
        }
    }

    /// Add an annotation, upgrading a plain error to a container first
    ///
    /// Upgrading captures a stack starting at the caller. On a container the
    /// annotation is appended in place and the stack is left alone.
    #[inline(never)]
    #[must_use]
    pub fn annotate(self, annotation: impl Into<String>) -> Self {
        self.annotate_at(annotation.into(), 1)
    }

    /// Attach a stack starting at the caller unless one is already present
    #[inline(never)]
    #[must_use]
    pub fn add_stack(self) -> Self {
        self.add_stack_at(1)
    }

    #[inline(never)]
    pub(crate) fn annotate_at(self, annotation: String, skip: usize) -> Self {
        match self {
            Self::Plain(original) => {
                log::trace!("upgrading plain error with annotation {annotation:?}");
                Self::Annotated(Container::assemble(original, vec![annotation], skip + 1))
            }
            Self::Annotated(container) => {
                container.push(annotation);
                Self::Annotated(container)
            }
        }
    }

    #[inline(never)]
    pub(crate) fn add_stack_at(self, skip: usize) -> Self {
        match self {
            Self::Plain(original) => {
                log::trace!("upgrading plain error with a stack");
                Self::Annotated(Container::assemble(original, Vec::new(), skip + 1))
            }
            annotated @ Self::Annotated(_) => annotated,
        }
    }

    /// The original error, one level down from any container
    #[must_use]
    pub fn cause(&self) -> &Original {
        match self {
            Self::Plain(original) => original,
            Self::Annotated(container) => container.original(),
        }
    }

    /// Downcast the original error to a concrete type
    #[must_use]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: std::error::Error + 'static,
    {
        self.cause().downcast_ref::<T>()
    }

    /// The container, if this error has been annotated or given a stack
    #[must_use]
    pub fn container(&self) -> Option<&Container> {
        match self {
            Self::Plain(_) => None,
            Self::Annotated(container) => Some(container),
        }
    }

    /// Whether this error is carried in a container
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        matches!(self, Self::Annotated(_))
    }

    /// Snapshot of the annotations, empty for a plain error
    #[must_use]
    pub fn annotations(&self) -> Vec<String> {
        self.container().map(Container::annotations).unwrap_or_default()
    }

    /// The captured stack, `None` for a plain error
    #[must_use]
    pub fn stack(&self) -> Option<&Stack> {
        self.container().map(Container::stack)
    }

    /// Whether both errors carry the very same original error value
    #[must_use]
    pub fn same_cause(&self, other: &Self) -> bool {
        same_original(self.cause(), other.cause())
    }
}

impl Container {
    /// Build a container, recording the stack `skip` frames above the caller
    #[inline(never)]
    pub(crate) fn assemble(original: Original, annotations: Vec<String>, skip: usize) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                original,
                annotations: RwLock::new(annotations),
                stack: Stack::capture(skip + 1),
            }),
        }
    }

    /// The wrapped original error
    #[must_use]
    pub fn original(&self) -> &Original {
        &self.inner.original
    }

    /// Snapshot of the annotations in insertion order
    #[must_use]
    pub fn annotations(&self) -> Vec<String> {
        self.inner
            .annotations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The stack captured when this container was created
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.inner.stack
    }

    /// Whether both handles point at the same container
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(super) fn push(&self, annotation: String) {
        self.inner
            .annotations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(annotation);
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<Self>() {
            Ok(ours) => ours,
            Err(other) => Self::from_boxed(other.into()),
        }
    }
}

/// Identity comparison of two originals, ignoring vtable metadata
pub(crate) fn same_original(a: &Original, b: &Original) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}
