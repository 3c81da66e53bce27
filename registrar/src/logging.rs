//! Development-time tracing for the registrar.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Rule checks log at `debug`, catalog seeding at `info`, strict-mode stops at `warn`.
//!
//! - **Command output (`render`)**: Tables, JSON and `error:` lines on stdout.
//!   Always written, unaffected by `RUST_LOG`, so scripts can diff it.

use std::io::{self, IsTerminal};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, before parsing any catalog.
///
/// Filter comes from `RUST_LOG`, falling back to `warn`. Compact lines, no
/// ANSI colors when stderr is not a terminal.
///
/// # Example
/// ```bash
/// RUST_LOG=registrar=debug registrar run enroll.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
