//! Stable exit codes for registrar CLI commands.

/// Command succeeded; every scripted command was accepted.
pub const OK: i32 = 0;
/// Invalid config, catalog or arguments, or an I/O failure.
pub const INVALID: i32 = 1;
/// `registrar run` executed, but at least one command was rejected.
pub const REJECTED: i32 = 2;
