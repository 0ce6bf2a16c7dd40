//! Error types for producer rendering

use crate::template::TemplateError;
use nanoflow_quantity::Scope;

/// Producer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProducerError {
    /// Template could not be filled
    #[error("producer '{producer}': {source}")]
    Render {
        /// Producer name
        producer: String,
        /// Underlying template error
        #[source]
        source: TemplateError,
    },

    /// Producer used outside its scopes
    #[error("producer '{producer}' is not valid in scope '{scope}'")]
    NotValidInScope {
        /// Producer name
        producer: String,
        /// Requested scope
        scope: Scope,
    },

    /// Scope-dependent inputs lack an entry
    #[error("producer '{producer}' declares no inputs for scope '{scope}'")]
    MissingScopeInputs {
        /// Producer name
        producer: String,
        /// Requested scope
        scope: Scope,
    },

    /// Bundle asked to render a call
    #[error("producer '{producer}' has no call")]
    NoCall {
        /// Producer name
        producer: String,
    },

    /// Vector config absent from the run configuration
    #[error("producer '{producer}' needs vector config '{key}' in scope '{scope}'")]
    MissingVectorConfig {
        /// Producer name
        producer: String,
        /// Config key
        key: String,
        /// Scope of the lookup
        scope: Scope,
    },

    /// Vector config is a scalar
    #[error("producer '{producer}': config '{key}' must be a list")]
    NotAVector {
        /// Producer name
        producer: String,
        /// Config key
        key: String,
    },

    /// Vector configs of unequal length
    #[error("producer '{producer}': config '{key}' has {found} entries, expected {expected}")]
    VectorLengthMismatch {
        /// Producer name
        producer: String,
        /// Config key
        key: String,
        /// Length of the first vector
        expected: usize,
        /// Length of this vector
        found: usize,
    },

    /// Vector producer with outputs expanding to several calls
    #[error("producer '{producer}' declares outputs but expands to {calls} calls")]
    VectorOutputCollision {
        /// Producer name
        producer: String,
        /// Number of calls
        calls: usize,
    },
}

impl ProducerError {
    /// Name of the producer the error is about
    #[must_use]
    pub fn producer(&self) -> &str {
        match self {
            Self::Render { producer, .. }
            | Self::NotValidInScope { producer, .. }
            | Self::MissingScopeInputs { producer, .. }
            | Self::NoCall { producer }
            | Self::MissingVectorConfig { producer, .. }
            | Self::NotAVector { producer, .. }
            | Self::VectorLengthMismatch { producer, .. }
            | Self::VectorOutputCollision { producer, .. } => producer,
        }
    }
}
