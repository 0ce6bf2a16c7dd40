//! nanoflow Code Generation
//!
//! Turns a resolved plan into C++ dataframe statements.
//!
//! # Core Concepts
//!
//! - [`RunConfig`]: scopes, producers, outputs and parameters of one run,
//!   loaded from TOML, YAML or JSON
//! - [`RenderPlan`]: renders a [`ResolvedPlan`](nanoflow_graph::ResolvedPlan)
//!   into a [`RenderedPlan`]
//! - [`RenderedPlan::fingerprint`]: SHA-256 identity of the generated code
//!
//! Parameters are looked up in the table of the scope being rendered first,
//! then in the `global` table.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod render;

// Re-exports
pub use config::RunConfig;
pub use error::{ConfigError, RenderError};
pub use render::{RenderPlan, RenderedCall, RenderedPlan, RenderedScope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
