//! Producer tables, one module per physics object
//!
//! Every producer is built once on first use and shared through its
//! [`ProducerRef`](nanoflow_producer::ProducerRef).

#![allow(missing_docs)]

pub mod electrons;
pub mod event;
pub mod genparticles;
pub mod muons;
pub mod pairquantities;
pub mod pairselection;
pub mod scalefactors;
pub mod taus;

pub(crate) const GLOBAL: &[&str] = &["global"];
pub(crate) const CHANNELS: &[&str] = &["em", "et", "mt", "tt"];
pub(crate) const ALL_SCOPES: &[&str] = &["global", "em", "et", "mt", "tt"];
pub(crate) const EM_MT: &[&str] = &["em", "mt"];
pub(crate) const EM_ET: &[&str] = &["em", "et"];
pub(crate) const HADRONIC: &[&str] = &["et", "mt", "tt"];
