//! Call-site macros over the process default.
//!
//! `log_*!` take any values convertible into `LogValue` and join them with
//! spaces; the `*f!` forms take `format!`-style arguments.

/// Debug record from values.
#[macro_export]
macro_rules! log_debug {
    ($($value:expr),* $(,)?) => {
        $crate::debug(&[$($crate::LogValue::from($value)),*])
    };
}

/// Info record from values.
#[macro_export]
macro_rules! log_info {
    ($($value:expr),* $(,)?) => {
        $crate::info(&[$($crate::LogValue::from($value)),*])
    };
}

/// Warn record from values.
#[macro_export]
macro_rules! log_warn {
    ($($value:expr),* $(,)?) => {
        $crate::warn(&[$($crate::LogValue::from($value)),*])
    };
}

/// Error record from values.
#[macro_export]
macro_rules! log_error {
    ($($value:expr),* $(,)?) => {
        $crate::error(&[$($crate::LogValue::from($value)),*])
    };
}

/// Fatal record from values, then exit.
#[macro_export]
macro_rules! log_fatal {
    ($($value:expr),* $(,)?) => {
        $crate::fatal(&[$($crate::LogValue::from($value)),*])
    };
}

/// Fatal-severity record from values, then unwind.
#[macro_export]
macro_rules! log_panic {
    ($($value:expr),* $(,)?) => {
        $crate::panic(&[$($crate::LogValue::from($value)),*])
    };
}

/// Debug record from a format template.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::std::format_args!($($arg)+))
    };
}

/// Info record from a format template.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::std::format_args!($($arg)+))
    };
}

/// Warn record from a format template.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::warnf(::std::format_args!($($arg)+))
    };
}

/// Error record from a format template.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::std::format_args!($($arg)+))
    };
}

/// Fatal record from a format template, then exit.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}

/// Fatal-severity record from a format template, then unwind.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::panicf(::std::format_args!($($arg)+))
    };
}
