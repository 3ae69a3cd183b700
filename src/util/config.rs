//! Generator configuration.
//!
//! The configuration is fixed when `gendeps` is compiled: `gendeps.toml` at
//! the crate root is embedded into the binary, and the library path can be
//! overridden by setting `TAO_DLL` in the build environment. Nothing is read
//! at run time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration embedded at compile time.
const EMBEDDED: &str = include_str!("../../gendeps.toml");

/// Library path given to the build, if any.
const TAO_DLL: Option<&str> = option_env!("TAO_DLL");

/// Default install location of the core TAO library.
pub const DEFAULT_LIBRARY_PATH: &str = "/usr/local/lib/libtao.so";

/// Error raised for an invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse generator configuration")]
    Parse(#[from] toml::de::Error),

    #[error("invalid generator configuration: {0}")]
    Invalid(String),
}

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Native library settings
    pub library: LibraryConfig,

    /// Generated file settings
    pub output: OutputConfig,

    /// Logging settings
    pub log: LogConfig,
}

/// Native library settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Display name of the library
    pub name: String,

    /// Path of the shared library the bindings load
    pub path: String,

    /// Julia module the bindings are included in
    pub module: String,

    /// Name of the Julia constant holding the library path
    pub path_constant: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            name: "TAO".to_string(),
            path: DEFAULT_LIBRARY_PATH.to_string(),
            module: "TaoBindings".to_string(),
            path_constant: "taolib".to_string(),
        }
    }
}

/// Generated file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Name of the generated file, shown in its header
    pub file_name: String,

    /// Number of types per line in long type lists (0 disables wrapping)
    pub items_per_line: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            file_name: "deps.jl".to_string(),
            items_per_line: 5,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level of the messages written to stderr
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// The configuration compiled into this binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut config = Config::parse(EMBEDDED)?;
        if let Some(path) = TAO_DLL {
            config.library.path = path.to_string();
        }
        Ok(config)
    }

    /// Parse and check a configuration.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let library = &self.library;
        for (key, value) in [
            ("library.name", &library.name),
            ("library.path", &library.path),
            ("library.module", &library.module),
            ("library.path_constant", &library.path_constant),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("`{}` must not be empty", key)));
            }
        }
        if !is_identifier(&library.module) || !is_identifier(&library.path_constant) {
            return Err(ConfigError::Invalid(
                "`library.module` and `library.path_constant` must be Julia identifiers"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Filter directive for the log subscriber.
    pub fn log_filter(&self) -> String {
        format!("taodeps={0},gendeps={0}", self.log.level)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '!')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.library.module, "TaoBindings");
        assert_eq!(config.output.file_name, "deps.jl");
        if TAO_DLL.is_none() {
            assert_eq!(config.library.path, DEFAULT_LIBRARY_PATH);
        }
    }

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(Config::parse(EMBEDDED).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[library]\npath = \"/opt/tao/lib/libtao.so\"\n").unwrap();
        assert_eq!(config.library.path, "/opt/tao/lib/libtao.so");
        assert_eq!(config.library.name, "TAO");
        assert_eq!(config.output.items_per_line, 5);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::parse("[library]\nmodule = \"\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[library]\nmodule = \"Tao Bindings\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[output]\nitems_per_line = \"five\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_log_filter() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "taodeps=warn,gendeps=warn");
    }
}
