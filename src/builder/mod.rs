//! Binding builder.
//!
//! This module implements the measurement of the native ABI and the
//! rendering of the declarations that depend on it.

pub mod bindings;
