//! High-level operations.
//!
//! This module contains the implementation of the `gendeps` command.

pub mod generate;

pub use generate::{build_artifact, generate, generate_for, GenerateError, GenerateReport};
