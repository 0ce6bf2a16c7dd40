//! Generator-level quantities

use super::GLOBAL;
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Four-vector of the generated boson used for recoil corrections
pub static GEN_BOSON_VECTOR: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GenBosonVector")
        .call("met::calculateGenBosonVector({df}, {input}, {output}, {is_data})")
        .inputs([
            nanoaod::GEN_PARTICLE_PT,
            nanoaod::GEN_PARTICLE_ETA,
            nanoaod::GEN_PARTICLE_PHI,
            nanoaod::GEN_PARTICLE_MASS,
            nanoaod::GEN_PARTICLE_PDG_ID,
            nanoaod::GEN_PARTICLE_STATUS,
            nanoaod::GEN_PARTICLE_STATUS_FLAGS,
        ])
        .outputs([q::RECOIL_GENBOSON_P4])
        .scopes(GLOBAL)
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    vec![Arc::clone(&GEN_BOSON_VECTOR)]
}
