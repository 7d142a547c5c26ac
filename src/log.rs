#[doc(hidden)]
#[macro_export]
macro_rules! __label {
    ($stream:ident, $label:literal, $style:expr) => {{
        use owo_colors::OwoColorize;

        $label.if_supports_color(owo_colors::Stream::$stream, |s| s.style($style))
    }};
}

#[macro_export]
macro_rules! error {
    ($single:ident) => {
        eprintln!(
            "{}: {}",
            $crate::__label!(Stderr, "error", owo_colors::Style::new().bold().red()),
            format_args!("{}", $single)
        )
    };
    ($($arg:tt)+) => {
        eprintln!(
            "{}: {}",
            $crate::__label!(Stderr, "error", owo_colors::Style::new().bold().red()),
            format_args!($($arg)*)
        )
    };
}

/// Formats an `error: ...` line into a [`String`], for messages that carry several errors.
#[macro_export]
macro_rules! ferror {
    ($($arg:tt)+) => {
        format!(
            "{}: {}",
            $crate::__label!(Stderr, "error", owo_colors::Style::new().bold().red()),
            format_args!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! warn {
    ($single:ident) => {
        eprintln!(
            "{}: {}",
            $crate::__label!(Stderr, "warning", owo_colors::Style::new().bold().yellow()),
            format_args!("{}", $single)
        )
    };
    ($($arg:tt)+) => {
        eprintln!(
            "{}: {}",
            $crate::__label!(Stderr, "warning", owo_colors::Style::new().bold().yellow()),
            format_args!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        println!(
            "{}: {}",
            $crate::__label!(Stdout, "info", owo_colors::Style::new().bold().green()),
            format_args!($($arg)*)
        )
    };
}

/// Only prints when `PSETUP_TRACE` is set.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        if $crate::log::tracing() {
            println!(
                "{}: {}",
                $crate::__label!(Stdout, "trace", owo_colors::Style::new().bold()),
                format_args!($($arg)*)
            );
        }
    };
}

pub const TRACE_VAR: &str = "PSETUP_TRACE";

#[must_use]
pub fn tracing() -> bool {
    std::env::var_os(TRACE_VAR).is_some()
}
