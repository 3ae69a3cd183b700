//! Generation of the Julia bindings.
//!
//! The whole file is built in memory and only written once every check has
//! passed, so a failed run never leaves a truncated artifact behind.

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::builder::bindings::{
    emit_bindings, validate_platform, Artifact, EmitContext, Platform,
};
use crate::core::abi::AbiError;
use crate::core::registry::TypeRegistry;
use crate::util::config::Config;
use crate::util::hash;

/// Error during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A platform assumption does not hold.
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("failed to write bindings")]
    Io(#[from] std::io::Error),
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Number of declarations written
    pub declarations: usize,
    /// Size of the artifact in bytes
    pub bytes: usize,
    /// SHA-256 of the artifact
    pub fingerprint: String,
    /// Whether the configured library exists on this machine
    pub library_found: bool,
}

/// Build the bindings for a measured platform without writing them.
pub fn build_artifact(
    registry: &TypeRegistry,
    platform: &Platform,
    config: &Config,
) -> Result<Artifact, AbiError> {
    validate_platform(platform)?;
    let ctx = EmitContext::new(registry, platform, config);
    let mut artifact = Artifact::new();
    emit_bindings(&ctx, &mut artifact)?;
    Ok(artifact)
}

/// Generate the bindings for the build platform into `out`.
pub fn generate<W: Write>(config: &Config, out: &mut W) -> Result<GenerateReport, GenerateError> {
    let platform = Platform::probe()?;
    generate_for(&platform, config, out)
}

/// Generate the bindings for a measured platform into `out`.
pub fn generate_for<W: Write>(
    platform: &Platform,
    config: &Config,
    out: &mut W,
) -> Result<GenerateReport, GenerateError> {
    let registry = TypeRegistry::tao()?;
    let artifact = build_artifact(&registry, platform, config)?;

    let text = artifact.render();
    out.write_all(text.as_bytes())?;
    out.flush()?;

    let report = GenerateReport {
        declarations: artifact.len(),
        bytes: text.len(),
        fingerprint: hash::sha256_str(&text),
        library_found: Path::new(&config.library.path).exists(),
    };
    debug!(
        fingerprint = hash::short(&report.fingerprint),
        bytes = report.bytes,
        "rendered bindings"
    );
    info!(
        declarations = report.declarations,
        library = %config.library.path,
        "generated bindings"
    );
    Ok(report)
}
