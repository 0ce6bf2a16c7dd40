//! nanoflow Command Line
//!
//! Front end over the producer catalog: list and validate producers,
//! resolve a run configuration into per-scope execution order and render
//! the resulting dataframe calls.
//!
//! # Commands
//!
//! - `list [--scope S]`: catalog producers
//! - `validate`: structural check of the catalog
//! - `resolve --config FILE [--json] [--no-optimize]`: execution order
//! - `render --config FILE [--json]`: generated call statements

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cli;
mod commands;
pub mod logging;

// Re-exports
pub use cli::build_cli;
pub use commands::{list, render, resolve, run, validate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
