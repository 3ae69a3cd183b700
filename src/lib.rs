//! taodeps - ABI-exact Julia bindings for the TAO C library
//!
//! This crate measures, on the build platform, the size and signedness of
//! the native types the TAO bindings depend on and renders the matching
//! Julia declarations.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{AbiError, MeasuredRepresentation, NumberClass, TypeRegistry};
pub use ops::{generate, GenerateError, GenerateReport};
pub use util::config::Config;
