//! Error types for configuration and rendering

use nanoflow_producer::ProducerError;
use nanoflow_quantity::Scope;
use std::path::PathBuf;

/// Run configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Extension is not toml, yaml, yml or json
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(PathBuf),

    /// Invalid TOML
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Invalid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Invalid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No scope configured
    #[error("config lists no scopes")]
    NoScopes,

    /// Table entry for a scope missing from `scopes`
    #[error("[{table}] has an entry for scope '{scope}' which is not listed in `scopes`")]
    UnknownScope {
        /// Table name
        table: &'static str,
        /// Offending scope
        scope: Scope,
    },
}

/// Rendering errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A producer call could not be rendered
    #[error("rendering scope '{scope}' failed: {source}")]
    Call {
        /// Scope being rendered
        scope: Scope,
        /// Producer failure
        #[source]
        source: ProducerError,
    },
}

impl RenderError {
    /// Name of the failing producer
    #[must_use]
    pub fn producer(&self) -> &str {
        match self {
            Self::Call { source, .. } => source.producer(),
        }
    }
}
