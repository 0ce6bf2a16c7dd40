//! nanoflow Producer Catalog
//!
//! Declared quantities and producers of a tau-pair analysis on NanoAOD.
//!
//! # Layout
//!
//! - [`quantities::nanoaod`]: raw branches
//! - [`quantities::output`]: derived columns
//! - [`producers`]: event weights and filters, object selection masks,
//!   pair selection, pair kinematics, generator quantities, scale factors
//!
//! Producers are `static` [`Lazy`](once_cell::sync::Lazy) values so groups
//! sharing a sub-producer hold the same declaration.
//!
//! # Example
//!
//! ```rust
//! use nanoflow_catalog::default_registry;
//!
//! let registry = default_registry().unwrap();
//! assert!(registry.validate().is_valid());
//! assert!(registry.contains("BaseMuons"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod producers;
pub mod quantities;

use nanoflow_graph::{ProducerRegistry, RegistryError};
use nanoflow_producer::ProducerRef;

/// Channel scopes the catalog declares, besides `global`
pub const CHANNELS: &[&str] = producers::CHANNELS;

/// Top-level producers of every module
///
/// Sub-producers are reachable through their groups.
#[must_use]
pub fn all_producers() -> Vec<ProducerRef> {
    let mut all = producers::event::all();
    all.extend(producers::genparticles::all());
    all.extend(producers::muons::all());
    all.extend(producers::electrons::all());
    all.extend(producers::taus::all());
    all.extend(producers::pairselection::all());
    all.extend(producers::pairquantities::all());
    all.extend(producers::scalefactors::all());
    all
}

/// Register the whole catalog into `registry`
///
/// # Errors
/// The first declaration the registry rejects.
pub fn register_all(registry: &mut ProducerRegistry) -> Result<(), RegistryError> {
    registry.register_all(all_producers())?;
    tracing::debug!(producers = registry.len(), "catalog registered");
    Ok(())
}

/// Fresh registry holding the whole catalog
///
/// # Errors
/// The first declaration the registry rejects.
pub fn default_registry() -> Result<ProducerRegistry, RegistryError> {
    let mut registry = ProducerRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
