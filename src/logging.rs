//! Logging macros
//!
//! One set of macros for every build of the crate:
//! - `firmware` feature: forwarded to `defmt` (RTT transport)
//! - host tests: printed to stdout/stderr with a level prefix
//! - host non-test: arguments are evaluated and discarded
//!
//! Format strings must be valid for both `defmt` and `core::fmt`, so stick to
//! plain `{}` / `{:?}` placeholders without width or precision.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "firmware")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "firmware"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "firmware"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "firmware")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "firmware"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "firmware"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "firmware")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "firmware"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "firmware"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "firmware")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "firmware"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "firmware"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "firmware")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "firmware"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "firmware"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
