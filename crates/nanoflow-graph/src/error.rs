//! Error types for registration and resolution
//!
//! Provides error handling for:
//! - Malformed producer declarations
//! - Conflicting definitions under one name
//! - Scope, input and output resolution failures
//! - Dependency cycles

use nanoflow_producer::{ProducerError, TemplateError};
use nanoflow_quantity::{QuantityError, Scope};

/// Registration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Group without sub-producers
    #[error("producer group '{group}' has no sub-producers")]
    EmptyGroup {
        /// Group name
        group: String,
    },

    /// Non-bundle producer without call
    #[error("producer '{producer}' has no call template")]
    MissingCall {
        /// Producer name
        producer: String,
    },

    /// Malformed call template
    #[error("producer '{producer}' has an invalid call template: {source}")]
    InvalidTemplate {
        /// Producer name
        producer: String,
        /// Template error
        #[source]
        source: TemplateError,
    },

    /// Producer applies to no scope
    #[error("producer '{producer}' declares no scopes")]
    NoScopes {
        /// Producer name
        producer: String,
    },

    /// Producer name unusable as identifier
    #[error("invalid producer name: '{producer}'")]
    InvalidName {
        /// Producer name
        producer: String,
    },

    /// Sub-producer missing some of the group's scopes
    #[error("sub-producer '{subproducer}' of '{group}' is not valid in scopes {missing:?}")]
    SubproducerScope {
        /// Group name
        group: String,
        /// Sub-producer name
        subproducer: String,
        /// Group scopes the sub-producer lacks
        missing: Vec<Scope>,
    },

    /// Scope-dependent inputs do not match declared scopes
    #[error("producer '{producer}' has scope-dependent inputs without an entry for '{scope}'")]
    ScopeInputsMismatch {
        /// Producer name
        producer: String,
        /// Scope without entry, or entry without scope
        scope: Scope,
    },

    /// Vector producer without vector config keys
    #[error("vector producer '{producer}' names no vector configs")]
    EmptyVectorConfigs {
        /// Producer name
        producer: String,
    },

    /// Shape-specific builder method used on another shape
    #[error("producer '{producer}' is a {kind} but was declared with `{method}`")]
    MisappliedBuilder {
        /// Producer name
        producer: String,
        /// Builder method
        method: &'static str,
        /// Shape label of the producer
        kind: &'static str,
    },

    /// Two different declarations share a name
    #[error("producer '{name}' is already registered with a different definition")]
    ConflictingDefinition {
        /// Producer name
        name: String,
    },
}

/// Resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Requested name not in the registry
    #[error("unknown producer '{name}' requested in scope '{scope}'")]
    UnknownProducer {
        /// Requested name
        name: String,
        /// Scope of the request
        scope: Scope,
    },

    /// Producer requested outside its scopes
    #[error("producer '{producer}' is not valid in scope '{scope}' (valid in {valid})")]
    ScopeMismatch {
        /// Producer name
        producer: String,
        /// Scope of the request
        scope: Scope,
        /// Declared scopes, rendered
        valid: String,
    },

    /// Two producers write one quantity
    #[error("duplicate output: {0}")]
    DuplicateOutput(#[from] QuantityError),

    /// Input with no writer
    #[error("producer '{producer}' reads '{quantity}' which nothing produces in scope '{scope}'{}", hint(.providers))]
    UnresolvedInput {
        /// Reading producer
        producer: String,
        /// Missing quantity
        quantity: String,
        /// Scope
        scope: Scope,
        /// Registered producers that could write it
        providers: Vec<String>,
    },

    /// Dependency cycle between producers
    #[error("dependency cycle in scope '{scope}': {}", .producers.join(" -> "))]
    CycleDetected {
        /// Scope
        scope: Scope,
        /// Producers on the cycle
        producers: Vec<String>,
    },

    /// Requested output nobody writes
    #[error("requested output '{quantity}' is not produced in scope '{scope}'")]
    UnknownOutput {
        /// Quantity name
        quantity: String,
        /// Scope
        scope: Scope,
    },

    /// Requested output is an internal column
    #[error("requested output '{quantity}' in scope '{scope}' is internal to a producer group")]
    InternalOutputRequested {
        /// Quantity name
        quantity: String,
        /// Scope
        scope: Scope,
    },

    /// Producer-level failure
    #[error(transparent)]
    Producer(#[from] ProducerError),

    /// Nothing requested
    #[error("resolve request contains no scopes")]
    EmptyRequest,
}

fn hint(providers: &[String]) -> String {
    if providers.is_empty() {
        String::new()
    } else {
        format!(" (provided by: {})", providers.join(", "))
    }
}

/// Issue found by catalog-wide validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// Output written twice in overlapping scopes
    #[error(transparent)]
    DuplicateOutput(#[from] QuantityError),

    /// Input no producer writes in an overlapping scope
    #[error("producer '{producer}' reads '{quantity}' which no producer writes in scope '{scope}'")]
    UnresolvedInput {
        /// Reading producer
        producer: String,
        /// Missing quantity
        quantity: String,
        /// Scope
        scope: Scope,
    },

    /// Bundle outputs differ from its sub-producer outputs
    #[error("bundle '{group}' outputs do not match its sub-producer outputs")]
    BundleOutputMismatch {
        /// Group name
        group: String,
    },

    /// Producer cannot compute its inputs
    #[error(transparent)]
    Producer(#[from] ProducerError),
}
