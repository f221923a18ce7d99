//! Call-stack capture
//!
//! A [`Stack`] is recorded once, when a container is created, and never
//! changes afterwards. Capture walks outward from the caller with the
//! `backtrace` crate and stops at the runtime boundary so frames below
//! `main` (or below a thread's entry closure) are not recorded.

use std::fmt;

/// Upper bound on the number of physical frames examined per capture.
pub const MAX_FRAMES: usize = 32;

/// Placeholder for a file or function name the symbolizer could not resolve.
pub const UNKNOWN: &str = "<unknown>";

/// One recorded call site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Line number within `file`, `0` when unknown
    pub line: u32,
    /// Source file path
    pub file: String,
    /// Fully qualified, demangled function name
    pub function: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// Ordered call sites, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    /// Capture the current call stack.
    ///
    /// `skip` is the number of frames between the call to `capture` and the
    /// frame that should be recorded first: `Stack::capture(0)` records the
    /// function calling `capture`, `Stack::capture(1)` starts at its caller,
    /// and so on. Library entry points pass the depth of their own chain so
    /// the first frame is always the user's call site.
    ///
    /// Returns an empty stack when the `full-backtrace` feature is disabled.
    #[inline(never)]
    #[must_use]
    pub fn capture(skip: usize) -> Self {
        #[cfg(feature = "full-backtrace")]
        let frames = walk(skip);
        #[cfg(not(feature = "full-backtrace"))]
        let frames = Vec::new();

        log::trace!("captured {} stack frames (skip {skip})", frames.len());
        Self { frames }
    }

    /// Recorded frames, innermost first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate over the recorded frames
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Number of recorded frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl From<Vec<Frame>> for Stack {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(feature = "full-backtrace")]
fn walk(skip: usize) -> Vec<Frame> {
    let mut raw = Vec::with_capacity(MAX_FRAMES);
    backtrace::trace(|frame| {
        raw.push(frame.clone());
        raw.len() < MAX_FRAMES
    });

    // Inlined calls resolve to several symbols for one physical frame. The
    // flag records whether a symbol was the only one its frame resolved to.
    let mut frames = Vec::with_capacity(raw.len());
    let mut standalone = Vec::with_capacity(raw.len());
    for frame in &raw {
        let before = frames.len();
        backtrace::resolve_frame(frame, |symbol| frames.push(resolve(symbol)));
        if frames.len() == before {
            frames.push(Frame {
                line: 0,
                file: UNKNOWN.to_string(),
                function: UNKNOWN.to_string(),
            });
        }
        let resolved = frames.len() - before;
        standalone.extend(std::iter::repeat_n(resolved == 1, resolved));
    }

    let start = origin(&frames) + skip;
    let mut retained: Vec<(Frame, bool)> = frames
        .into_iter()
        .zip(standalone)
        .skip(start)
        .take_while(|(frame, _)| !is_runtime_boundary(&frame.function))
        .collect();

    trim_shims(&mut retained);
    retained.into_iter().map(|(frame, _)| frame).collect()
}

/// Drop trailing call shims between the outermost caller and the runtime.
///
/// Only frames that resolved to nothing but the shim symbol are dropped,
/// since an optimised caller may be inlined into one, and the last
/// remaining frame is always kept.
#[cfg(feature = "full-backtrace")]
fn trim_shims(retained: &mut Vec<(Frame, bool)>) {
    while retained.len() > 1
        && retained.last().is_some_and(|(frame, standalone)| {
            *standalone && frame.function.starts_with("core::ops::function::")
        })
    {
        retained.pop();
    }
}

/// Index of the first frame above `Stack::capture`.
#[cfg(feature = "full-backtrace")]
fn origin(frames: &[Frame]) -> usize {
    let anchor = concat!(module_path!(), "::Stack::capture");
    if let Some(at) = frames.iter().position(|frame| frame.function == anchor) {
        return at + 1;
    }

    // Unresolved symbols: drop the unwinder's own frames and this module's.
    let internal = frames
        .iter()
        .take_while(|frame| {
            frame.function.starts_with("backtrace::")
                || frame.function.starts_with("_Unwind")
                || frame.function.starts_with(concat!(module_path!(), "::"))
                || frame.function == UNKNOWN
        })
        .count();
    internal.max(1)
}

#[cfg(feature = "full-backtrace")]
fn is_runtime_boundary(function: &str) -> bool {
    function.contains("__rust_begin_short_backtrace") || function.starts_with("std::rt::lang_start")
}

#[cfg(feature = "full-backtrace")]
fn resolve(symbol: &backtrace::Symbol) -> Frame {
    Frame {
        line: symbol.lineno().unwrap_or(0),
        file: symbol
            .filename()
            .map_or_else(|| UNKNOWN.to_string(), |path| path.display().to_string()),
        function: symbol
            .name()
            .map_or_else(|| UNKNOWN.to_string(), |name| format!("{name:#}")),
    }
}
