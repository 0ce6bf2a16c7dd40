//! Selection of the di-tau candidate pair
//!
//! Each channel writes `ditaupair`, the indices of the two selected objects.

use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub static MU_TAU_PAIR_SELECTION: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuTauPairSelection")
        .call("pairselection::mutau::PairSelection({df}, {input_vec}, {output}, {pairselection_min_dR})")
        .inputs([
            nanoaod::TAU_PT,
            nanoaod::TAU_ETA,
            nanoaod::TAU_PHI,
            nanoaod::TAU_MASS,
            nanoaod::TAU_ID_RAW,
            nanoaod::MUON_PT,
            nanoaod::MUON_ETA,
            nanoaod::MUON_PHI,
            nanoaod::MUON_MASS,
            nanoaod::MUON_ISO,
            q::GOOD_MUONS_MASK,
            q::BASE_TAUS_MASK,
        ])
        .outputs([q::DITAUPAIR])
        .scopes(&["mt"])
        .build()
});

pub static EL_MU_PAIR_SELECTION: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElMuPairSelection")
        .call("pairselection::elmu::PairSelection({df}, {input_vec}, {output}, {pairselection_min_dR})")
        .inputs([
            nanoaod::ELECTRON_PT,
            nanoaod::ELECTRON_ETA,
            nanoaod::ELECTRON_PHI,
            nanoaod::ELECTRON_MASS,
            nanoaod::ELECTRON_ISO,
            nanoaod::MUON_PT,
            nanoaod::MUON_ETA,
            nanoaod::MUON_PHI,
            nanoaod::MUON_MASS,
            nanoaod::MUON_ISO,
            q::GOOD_ELECTRONS_MASK,
            q::GOOD_MUONS_MASK,
        ])
        .outputs([q::DITAUPAIR])
        .scopes(&["em"])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    vec![
        Arc::clone(&MU_TAU_PAIR_SELECTION),
        Arc::clone(&EL_MU_PAIR_SELECTION),
    ]
}
