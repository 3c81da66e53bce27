//! Deterministic, pure logic for course and student records.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod course;
pub mod directory;
pub mod enrollment;
pub mod error;
pub mod ident;
pub mod invariants;
pub mod student;
pub mod types;
