//! In-memory university registration engine.
//!
//! The crate keeps course and student records and enforces the enrollment rules
//! that tie them together: capacity limits, prerequisites and per-student credit
//! limits. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (identities, registries, the
//!   enrollment coordinator, invariant checks). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config and seed catalog files, scaffolding).
//!
//! Orchestration modules ([`session`], [`command`], [`shell`], [`render`], [`validate`])
//! turn config files and text commands into [`core::directory::Directory`] operations
//! and format their results for the CLI.

pub mod command;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod render;
pub mod session;
pub mod shared;
pub mod shell;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
