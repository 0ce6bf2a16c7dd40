//! Kinematics of the selected pair

use super::EM_MT;
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use nanoflow_quantity::Quantity;
use once_cell::sync::Lazy;
use std::sync::Arc;

fn lorentz_vector(
    name: &'static str,
    call: &'static str,
    object: [Quantity; 4],
    output: Quantity,
    scope: &'static str,
) -> ProducerRef {
    let [pt, eta, phi, mass] = object;
    Producer::builder(name)
        .call(call)
        .inputs([q::DITAUPAIR, pt, eta, phi, mass])
        .outputs([output])
        .scopes(&[scope])
        .build()
}

const MUON_P4: [Quantity; 4] = [
    nanoaod::MUON_PT,
    nanoaod::MUON_ETA,
    nanoaod::MUON_PHI,
    nanoaod::MUON_MASS,
];
const ELECTRON_P4: [Quantity; 4] = [
    nanoaod::ELECTRON_PT,
    nanoaod::ELECTRON_ETA,
    nanoaod::ELECTRON_PHI,
    nanoaod::ELECTRON_MASS,
];
const TAU_P4: [Quantity; 4] = [
    nanoaod::TAU_PT,
    nanoaod::TAU_ETA,
    nanoaod::TAU_PHI,
    nanoaod::TAU_MASS,
];

pub static LV_MU_1: Lazy<ProducerRef> = Lazy::new(|| {
    lorentz_vector(
        "LVMu1",
        "lorentzvectors::build({df}, {input_vec}, 0, {output})",
        MUON_P4,
        q::P4_1,
        "mt",
    )
});

pub static LV_TAU_2: Lazy<ProducerRef> = Lazy::new(|| {
    lorentz_vector(
        "LVTau2",
        "lorentzvectors::build({df}, {input_vec}, 1, {output})",
        TAU_P4,
        q::P4_2,
        "mt",
    )
});

pub static LV_EL_1: Lazy<ProducerRef> = Lazy::new(|| {
    lorentz_vector(
        "LVEl1",
        "lorentzvectors::build({df}, {input_vec}, 0, {output})",
        ELECTRON_P4,
        q::P4_1,
        "em",
    )
});

pub static LV_MU_2: Lazy<ProducerRef> = Lazy::new(|| {
    lorentz_vector(
        "LVMu2",
        "lorentzvectors::build({df}, {input_vec}, 1, {output})",
        MUON_P4,
        q::P4_2,
        "em",
    )
});

pub static PT_1: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("pt_1")
        .call("quantities::pt({df}, {output}, {input})")
        .inputs([q::P4_1])
        .outputs([q::PT_1])
        .scopes(EM_MT)
        .build()
});

pub static ETA_1: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("eta_1")
        .call("quantities::eta({df}, {output}, {input})")
        .inputs([q::P4_1])
        .outputs([q::ETA_1])
        .scopes(EM_MT)
        .build()
});

pub static PT_2: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("pt_2")
        .call("quantities::pt({df}, {output}, {input})")
        .inputs([q::P4_2])
        .outputs([q::PT_2])
        .scopes(EM_MT)
        .build()
});

pub static ETA_2: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("eta_2")
        .call("quantities::eta({df}, {output}, {input})")
        .inputs([q::P4_2])
        .outputs([q::ETA_2])
        .scopes(EM_MT)
        .build()
});

pub static DECAYMODE_2: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("decaymode_2")
        .call("quantities::tau::decaymode({df}, {output}, 1, {input})")
        .inputs([q::DITAUPAIR, nanoaod::TAU_DECAY_MODE])
        .outputs([q::DECAYMODE_2])
        .scopes(&["mt"])
        .build()
});

pub static GEN_MATCH_2: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("gen_match_2")
        .call("quantities::tau::genmatch({df}, {output}, 1, {input})")
        .inputs([q::DITAUPAIR, nanoaod::TAU_GEN_MATCH])
        .outputs([q::GEN_MATCH_2])
        .scopes(&["mt"])
        .build()
});

/// Kinematics of the first pair member
pub static UNROLL_LV_1: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("UnrollLV1")
        .scopes(EM_MT)
        .subproducers([Arc::clone(&PT_1), Arc::clone(&ETA_1)])
        .build()
});

/// Kinematics of the second pair member
pub static UNROLL_LV_2: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("UnrollLV2")
        .scopes(EM_MT)
        .subproducers([Arc::clone(&PT_2), Arc::clone(&ETA_2)])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    [
        &LV_MU_1,
        &LV_TAU_2,
        &LV_EL_1,
        &LV_MU_2,
        &UNROLL_LV_1,
        &UNROLL_LV_2,
        &DECAYMODE_2,
        &GEN_MATCH_2,
    ]
    .into_iter()
    .map(|p| Arc::clone(p))
    .collect()
}
