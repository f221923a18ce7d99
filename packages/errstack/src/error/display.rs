//! Display and trait implementations for Error
//!
//! `{}` renders the annotated message, `{:+}`, `{:?}` and `{:#?}` render the
//! full report with the stack tree. [`Error::render`] selects a [`Style`]
//! explicitly, including the plain and quoted forms of the original message.

use super::types::Error;
use std::fmt;

/// How an [`Error`] is rendered by [`Error::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// The original error's message only
    Plain,
    /// The original error's message in double quotes, escaped
    Quoted,
    /// Annotated message followed by the captured stack
    Full,
}

/// Display adapter returned by [`Error::render`]
#[derive(Clone, Copy)]
pub struct Rendered<'a> {
    error: &'a Error,
    style: Style,
}

impl Error {
    /// Render with an explicit [`Style`]
    #[must_use]
    pub fn render(&self, style: Style) -> Rendered<'_> {
        Rendered { error: self, style }
    }

    fn write_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(original) => write!(f, "{original}"),
            Self::Annotated(container) => {
                // Snapshot first: the original's Display may annotate this container.
                for annotation in container.annotations() {
                    write!(f, "{annotation}: ")?;
                }
                write!(f, "{}", container.original())
            }
        }
    }

    fn write_report(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error: ")?;
        self.write_message(f)?;
        f.write_str("\n  │\n")?;

        let Some(stack) = self.stack() else {
            return Ok(());
        };
        let last = stack.len().saturating_sub(1);
        for (i, frame) in stack.iter().enumerate() {
            let (start, rail) = if i == last { ("└─ ", " ") } else { ("├─ ", "│") };
            write!(
                f,
                "  {start}({})\n  {rail}     {}:{}\n  {rail}\n",
                frame.function, frame.file, frame.line
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            Style::Plain => write!(f, "{}", self.error.cause()),
            Style::Quoted => write!(f, "{:?}", self.error.cause().to_string()),
            Style::Full => self.error.write_report(f),
        }
    }
}

impl fmt::Debug for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.sign_plus() {
            self.write_report(f)
        } else {
            self.write_message(f)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f)
    }
}

impl std::error::Error for Error {
    // Transparent: our message already ends with the original's.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause().source()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.same_cause(other)
    }
}

impl Eq for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::types::{Container, ContainerInner, Message};
    use crate::stack::{Frame, Stack};
    use std::sync::{Arc, OnceLock, RwLock};

    fn container(annotations: &[&str], frames: Vec<Frame>) -> Error {
        Error::Annotated(Container {
            inner: Arc::new(ContainerInner {
                original: Arc::new(Message("whoops".to_string())),
                annotations: RwLock::new(annotations.iter().map(|a| a.to_string()).collect()),
                stack: Stack::from(frames),
            }),
        })
    }

    fn frame(function: &str, file: &str, line: u32) -> Frame {
        Frame {
            line,
            file: file.to_string(),
            function: function.to_string(),
        }
    }

    #[test]
    fn full_report_draws_stack_tree() {
        let err = container(
            &["oh no"],
            vec![
                frame("app::load", "src/load.rs", 12),
                frame("app::main", "src/main.rs", 36),
            ],
        );

        let expected = "Error: oh no: whoops\n  │\n\
                        \x20 ├─ (app::load)\n  │     src/load.rs:12\n  │\n\
                        \x20 └─ (app::main)\n        src/main.rs:36\n   \n";
        assert_eq!(format!("{err:?}"), expected);
        assert_eq!(err.render(Style::Full).to_string(), expected);
        assert_eq!(format!("{err:+}"), expected);
    }

    #[test]
    fn empty_stack_renders_header_only() {
        let err = container(&[], Vec::new());
        assert_eq!(format!("{err:?}"), "Error: whoops\n  │\n");
    }

    #[test]
    fn plain_and_quoted_ignore_annotations() {
        let err = container(&["a", "b"], Vec::new());
        assert_eq!(err.to_string(), "a: b: whoops");
        assert_eq!(err.render(Style::Plain).to_string(), "whoops");
        assert_eq!(err.render(Style::Quoted).to_string(), "\"whoops\"");
    }

    #[test]
    fn quoted_escapes_quotes_and_backslashes() {
        let err = Error::Plain(Arc::new(Message(r#"say "hi" \ bye"#.to_string())));
        assert_eq!(
            err.render(Style::Quoted).to_string(),
            r#""say \"hi\" \\ bye""#
        );
    }

    /// Annotates the error that carries it whenever it is displayed
    struct Reentrant(Arc<OnceLock<Error>>);

    impl fmt::Debug for Reentrant {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Reentrant")
        }
    }

    impl fmt::Display for Reentrant {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if let Some(err) = self.0.get() {
                let _ = err.clone().annotate("seen");
            }
            f.write_str("reentrant")
        }
    }

    impl std::error::Error for Reentrant {}

    #[test]
    fn display_allows_annotating_from_within_original() {
        let slot = Arc::new(OnceLock::new());
        let err = Error::wrap(Reentrant(Arc::clone(&slot))).annotate("outer");
        assert!(slot.set(err.clone()).is_ok());

        assert_eq!(err.to_string(), "outer: reentrant");
        assert_eq!(err.annotations(), vec!["outer", "seen"]);
        assert!(format!("{err:?}").starts_with("Error: outer: seen: reentrant\n"));
        assert_eq!(err.annotations().len(), 3);
    }
}
