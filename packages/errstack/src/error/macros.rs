//! Macros for error creation and handling

/// Create an error from a format string, with a stack starting at the caller
///
/// ```
/// let err = errstack::err!("missing key {}", "alpha");
/// assert_eq!(err.to_string(), "missing key alpha");
/// ```
#[macro_export]
macro_rules! err {
    ($($arg:tt)+) => {
        $crate::new_fmt(::core::format_args!($($arg)+))
    };
}

/// Annotate an `Option` of an error with a formatted annotation
///
/// ```
/// let err = errstack::annotate!(Some(errstack::new("hello")), "yoo {}", "awooo");
/// assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("yoo awooo: hello"));
/// ```
#[macro_export]
macro_rules! annotate {
    ($err:expr, $($arg:tt)+) => {
        $crate::annotate_fmt($err, ::core::format_args!($($arg)+))
    };
}

/// Return early with an error built by [`err!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::err!($($arg)+))
    };
}

/// Return early with an error built by [`err!`] unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
