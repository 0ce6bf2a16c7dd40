//! nanoflow Dependency Graph
//!
//! Registry and per-scope resolution of producer declarations.
//!
//! # Core Concepts
//!
//! - [`ProducerRegistry`]: name-keyed catalog with structural validation
//! - [`Resolver`]: turns a [`ResolveRequest`] into a [`ResolvedPlan`]
//! - [`ScopePlan`]: producers of one scope in execution order
//!
//! Resolution is deterministic: for a given registry and request the
//! resulting order is always the same. Producers are ordered topologically
//! by the quantities they read and write; among producers that are ready at
//! the same time, the one requested first runs first.
//!
//! # Example
//!
//! ```rust
//! use nanoflow_graph::{ProducerRegistry, ResolveRequest, Resolver};
//! use nanoflow_producer::Producer;
//! use nanoflow_quantity::{Quantity, Scope};
//!
//! let mut registry = ProducerRegistry::new();
//! registry
//!     .register(
//!         Producer::builder("Lumi")
//!             .call("basefunctions::rename<UInt_t>({df}, {input}, {output})")
//!             .inputs([Quantity::nano_aod("luminosityBlock")])
//!             .outputs([Quantity::derived("lumi")])
//!             .scopes(&["global"])
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let request = ResolveRequest::new().scope(Scope::GLOBAL, ["Lumi"], ["lumi"]);
//! let plan = Resolver::new(&registry).resolve(&request).unwrap();
//! assert_eq!(plan.global().unwrap().names(), ["Lumi"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod plan;
mod registry;
mod resolver;

// Re-exports
pub use error::{RegistryError, ResolveError, ValidationIssue};
pub use plan::{ResolveRequest, ResolvedPlan, ScopePlan, ScopeRequest};
pub use registry::{ProducerRegistry, ValidationReport};
pub use resolver::Resolver;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
pub mod prelude {
    pub use crate::{ProducerRegistry, ResolveRequest, ResolvedPlan, Resolver, ScopePlan};
}
