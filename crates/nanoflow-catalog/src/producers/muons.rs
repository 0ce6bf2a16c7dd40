//! Muon selection masks and muon vetoes

use super::{CHANNELS, EM_MT, GLOBAL};
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use nanoflow_quantity::Quantity;
use once_cell::sync::Lazy;
use std::sync::Arc;

// Loosest muon selection

pub static MUON_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_muon_pt})")
        .inputs([nanoaod::MUON_PT])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static MUON_ETA_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_muon_eta})")
        .inputs([nanoaod::MUON_ETA])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static MUON_DXY_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonDxyCut")
        .call("physicsobject::CutDxy({df}, {input}, {output}, {max_muon_dxy})")
        .inputs([nanoaod::MUON_DXY])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static MUON_DZ_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonDzCut")
        .call("physicsobject::CutDz({df}, {input}, {output}, {max_muon_dz})")
        .inputs([nanoaod::MUON_DZ])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static MUON_ID_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonIDCut")
        .call(r#"physicsobject::muon::CutID({df}, {output}, "{muon_id}")"#)
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static MUON_ISO_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("MuonIsoCut")
        .call("physicsobject::muon::CutIsolation({df}, {output}, {input}, {muon_iso_cut})")
        .inputs([nanoaod::MUON_ISO])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static BASE_MUONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("BaseMuons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .outputs([q::BASE_MUONS_MASK])
        .scopes(GLOBAL)
        .subproducers([
            Arc::clone(&MUON_PT_CUT),
            Arc::clone(&MUON_ETA_CUT),
            Arc::clone(&MUON_DXY_CUT),
            Arc::clone(&MUON_DZ_CUT),
            Arc::clone(&MUON_ID_CUT),
            Arc::clone(&MUON_ISO_CUT),
        ])
        .build()
});

// Channel-specific muon selection

pub static GOOD_MUON_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodMuonPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_muon_pt})")
        .inputs([nanoaod::MUON_PT])
        .internal_output()
        .scopes(EM_MT)
        .build()
});

pub static GOOD_MUON_ETA_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodMuonEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_muon_eta})")
        .inputs([nanoaod::MUON_ETA])
        .internal_output()
        .scopes(EM_MT)
        .build()
});

/// Relative isolation cut on good muons
///
/// Calls the muon isolation helper. Older catalogs routed this cut through
/// `physicsobject::electron::CutIsolation`, which only worked because both
/// helpers share a signature.
pub static GOOD_MUON_ISO_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodMuonIsoCut")
        .call("physicsobject::muon::CutIsolation({df}, {output}, {input}, {muon_iso_cut})")
        .inputs([nanoaod::MUON_ISO])
        .internal_output()
        .scopes(EM_MT)
        .build()
});

pub static GOOD_MUONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("GoodMuons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .inputs([q::BASE_MUONS_MASK])
        .outputs([q::GOOD_MUONS_MASK])
        .scopes(EM_MT)
        .subproducers([
            Arc::clone(&GOOD_MUON_PT_CUT),
            Arc::clone(&GOOD_MUON_ETA_CUT),
            Arc::clone(&GOOD_MUON_ISO_CUT),
        ])
        .build()
});

/// Base muons except the one selected into the pair
pub static VETO_MUONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("VetoMuons")
        .call("physicsobject::VetoCandInMask({df}, {output}, {input}, {mu_idx})")
        .inputs([q::BASE_MUONS_MASK, q::DITAUPAIR])
        .outputs([q::VETO_MUONS_MASK])
        .scopes(EM_MT)
        .build()
});

/// Flag events with muons beyond the selected pair
///
/// Channels with a muon in the pair veto on the remaining base muons, the
/// others on every base muon.
pub static EXTRA_MUONS_VETO: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ExtraMuonsVeto")
        .call("physicsobject::LeptonVetoFlag({df}, {output}, {input})")
        .inputs_per_scope([
            ("em", [q::VETO_MUONS_MASK]),
            ("et", [q::BASE_MUONS_MASK]),
            ("mt", [q::VETO_MUONS_MASK]),
            ("tt", [q::BASE_MUONS_MASK]),
        ])
        .outputs([q::MUON_VETO_FLAG])
        .scopes(CHANNELS)
        .build()
});

// Di-muon veto

pub static DI_MUON_VETO_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("DiMuonVetoPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_dimuonveto_pt})")
        .inputs([nanoaod::MUON_PT])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static DI_MUON_VETO_ID_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("DiMuonVetoIDCut")
        .call(r#"physicsobject::muon::CutID({df}, {output}, "{dimuonveto_id}")"#)
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

/// Reuses the eta, impact-parameter and isolation masks of [`BASE_MUONS`]
pub static DI_MUON_VETO_MUONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("DiMuonVetoMuons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .inputs([
            Quantity::internal(MUON_ETA_CUT.name()),
            Quantity::internal(MUON_DXY_CUT.name()),
            Quantity::internal(MUON_DZ_CUT.name()),
            Quantity::internal(MUON_ISO_CUT.name()),
        ])
        .internal_output()
        .scopes(GLOBAL)
        .subproducers([Arc::clone(&DI_MUON_VETO_PT_CUT), Arc::clone(&DI_MUON_VETO_ID_CUT)])
        .build()
});

pub static DI_MUON_VETO: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("DiMuonVeto")
        .call("physicsobject::CheckForDiLeptonPairs({df}, {output}, {input}, {dileptonveto_dR})")
        .inputs([
            nanoaod::MUON_PT,
            nanoaod::MUON_ETA,
            nanoaod::MUON_PHI,
            nanoaod::MUON_MASS,
            nanoaod::MUON_CHARGE,
        ])
        .outputs([q::DIMUON_VETO])
        .scopes(GLOBAL)
        .subproducers([Arc::clone(&DI_MUON_VETO_MUONS)])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    [
        &BASE_MUONS,
        &GOOD_MUONS,
        &VETO_MUONS,
        &EXTRA_MUONS_VETO,
        &DI_MUON_VETO,
    ]
    .into_iter()
    .map(|p| Arc::clone(p))
    .collect()
}
