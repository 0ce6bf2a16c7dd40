//! Hadronic tau selection

use super::HADRONIC;
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub static TAU_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("TauPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_tau_pt})")
        .inputs([nanoaod::TAU_PT])
        .internal_output()
        .scopes(HADRONIC)
        .build()
});

pub static TAU_ETA_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("TauEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_tau_eta})")
        .inputs([nanoaod::TAU_ETA])
        .internal_output()
        .scopes(HADRONIC)
        .build()
});

pub static TAU_DZ_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("TauDzCut")
        .call("physicsobject::CutDz({df}, {input}, {output}, {max_tau_dz})")
        .inputs([nanoaod::TAU_DZ])
        .internal_output()
        .scopes(HADRONIC)
        .build()
});

/// Decay modes given as a list, rendered into a brace initializer
pub static TAU_DM_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("TauDMCut")
        .call("physicsobject::tau::CutDecayModes({df}, {output}, {input}, {vec_open}{tau_dms}{vec_close})")
        .inputs([nanoaod::TAU_DECAY_MODE])
        .internal_output()
        .scopes(HADRONIC)
        .build()
});

pub static BASE_TAUS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("BaseTaus")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .outputs([q::BASE_TAUS_MASK])
        .scopes(HADRONIC)
        .subproducers([
            Arc::clone(&TAU_PT_CUT),
            Arc::clone(&TAU_ETA_CUT),
            Arc::clone(&TAU_DZ_CUT),
            Arc::clone(&TAU_DM_CUT),
        ])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    vec![Arc::clone(&BASE_TAUS)]
}
