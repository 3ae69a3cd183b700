//! Core data structures for taodeps.
//!
//! This module contains the foundational types used throughout the generator:
//! - Measured representations and ABI errors
//! - The compiled-in definitions of the TAO library
//! - The registry of shared array element types

pub mod abi;
pub mod native;
pub mod registry;

pub use abi::{AbiError, FieldRepresentation, MeasuredRepresentation, NumberClass, StructLayout};
pub use registry::{NativeTypeEntry, TypeRegistry};
