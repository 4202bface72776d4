//! Logging macros that forward to `tracing` when the `tracing` feature is
//! enabled and compile to nothing when it is not.

/// Forwards to `tracing::debug!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

/// No-op; enable the `tracing` feature for diagnostics.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// Forwards to `tracing::warn!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { ::tracing::warn!($($arg)*) };
}

/// No-op; enable the `tracing` feature for diagnostics.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
