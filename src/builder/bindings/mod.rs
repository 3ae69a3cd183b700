//! ABI-exact binding generation for the TAO C library.
//!
//! This module measures the native representations on the build platform,
//! maps them to Julia types and renders the declarations of the bindings.

pub mod artifact;
pub mod emit;
pub mod probe;
pub mod resolve;
pub mod validate;

pub use artifact::{Artifact, Decl};
pub use emit::{emit_bindings, EmitContext};
pub use probe::{probe_enum, probe_scalar, CEnum, Platform, Scalar, SignProbe};
pub use resolve::{AliasResolver, AliasStyle};
pub use validate::validate_platform;
