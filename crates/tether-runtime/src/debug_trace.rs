#![forbid(unsafe_code)]

//! Stderr lifecycle trace, switched on by `TETHER_DEBUG_TRACE`.
//!
//! Set `TETHER_DEBUG_TRACE=1` (or `true`, `on`) to print positioner
//! lifecycle lines (open, pass, fallback, close) without installing a
//! `tracing` subscriber. When unset, each call site costs one static bool
//! load and the format arguments are never evaluated.
//!
//! ```ignore
//! tether_runtime::debug_trace!("pass: placement={}", placement);
//! ```

use std::fmt;
use std::io::Write;
use std::sync::LazyLock;
use std::time::Instant;

/// Environment variable that enables the trace.
pub const DEBUG_TRACE_ENV: &str = "TETHER_DEBUG_TRACE";

static ENABLED: LazyLock<bool> =
    LazyLock::new(|| parse_flag(std::env::var(DEBUG_TRACE_ENV).ok().as_deref()));

static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "on")
    )
}

/// Whether the trace is switched on for this process.
#[inline]
pub fn is_enabled() -> bool {
    *ENABLED
}

/// Milliseconds since the first trace line.
pub fn elapsed_ms() -> u64 {
    u64::try_from(EPOCH.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Write one trace line. Called by [`debug_trace!`](crate::debug_trace).
#[doc(hidden)]
pub fn emit(args: fmt::Arguments<'_>) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "[tether {:>8}ms] {args}", elapsed_ms());
}

/// Print a timestamped line to stderr when `TETHER_DEBUG_TRACE` is set.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            $crate::debug_trace::emit(format_args!($($arg)*));
        }
    };
}
