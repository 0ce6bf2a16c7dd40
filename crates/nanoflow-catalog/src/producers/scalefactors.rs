//! Lepton identification and isolation scale factors

use crate::quantities::output as q;
use nanoflow_producer::{Producer, ProducerRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub static MUON_1_ID_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Muon_1_ID_SF")
        .call(r#"scalefactor::muon::id({df}, {input}, "{muon_sf_year_id}", "{muon_sf_variation}", {output}, "{muon_sf_file}", "{muon_id_sf_name}")"#)
        .inputs([q::PT_1, q::ETA_1])
        .outputs([q::ID_WGT_MU_1])
        .scopes(&["mt"])
        .build()
});

pub static MUON_1_ISO_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Muon_1_Iso_SF")
        .call(r#"scalefactor::muon::iso({df}, {input}, "{muon_sf_year_id}", "{muon_sf_variation}", {output}, "{muon_sf_file}", "{muon_iso_sf_name}")"#)
        .inputs([q::PT_1, q::ETA_1])
        .outputs([q::ISO_WGT_MU_1])
        .scopes(&["mt"])
        .build()
});

pub static MUON_ID_ISO_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("MuonIDIso_SF")
        .scopes(&["mt"])
        .subproducers([Arc::clone(&MUON_1_ID_SF), Arc::clone(&MUON_1_ISO_SF)])
        .build()
});

pub static TAU_2_VSJET_ID_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Tau_2_VsJetTauID_SF")
        .call(r#"scalefactor::tau::id_vsJet({df}, {input}, {vec_open}{tau_dms}{vec_close}, "{tau_sf_vsjet_wp}", "{tau_sf_vsjet_variation}", "{tau_sf_vsjet_dependence}", {output}, "{tau_sf_file}", "{tau_vsjet_sf_name}")"#)
        .inputs([q::PT_2, q::DECAYMODE_2, q::GEN_MATCH_2])
        .outputs([q::ID_WGT_TAU_VSJET_2])
        .scopes(&["mt"])
        .build()
});

pub static TAU_2_VSELE_ID_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Tau_2_VsEleTauID_SF")
        .call(r#"scalefactor::tau::id_vsEle({df}, {input}, {vec_open}{tau_dms}{vec_close}, "{tau_sf_vsele_wp}", "{tau_sf_vsele_variation}", {output}, "{tau_sf_file}", "{tau_vsele_sf_name}")"#)
        .inputs([q::ETA_2, q::DECAYMODE_2, q::GEN_MATCH_2])
        .outputs([q::ID_WGT_TAU_VSELE_2])
        .scopes(&["mt"])
        .build()
});

pub static TAU_2_VSMU_ID_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Tau_2_VsMuTauID_SF")
        .call(r#"scalefactor::tau::id_vsMu({df}, {input}, {vec_open}{tau_dms}{vec_close}, "{tau_sf_vsmu_wp}", "{tau_sf_vsmu_variation}", {output}, "{tau_sf_file}", "{tau_vsmu_sf_name}")"#)
        .inputs([q::ETA_2, q::DECAYMODE_2, q::GEN_MATCH_2])
        .outputs([q::ID_WGT_TAU_VSMU_2])
        .scopes(&["mt"])
        .build()
});

pub static ELE_1_ID_SF: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Ele_1_ID_SF")
        .call(r#"scalefactor::electron::id({df}, {input}, "{ele_sf_year_id}", "{ele_id_sf_wp}", "{ele_sf_variation}", {output}, "{ele_sf_file}", "{ele_id_sf_name}")"#)
        .inputs([q::PT_1, q::ETA_1])
        .outputs([q::ID_WGT_ELE_1])
        .scopes(&["em"])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    [
        &MUON_ID_ISO_SF,
        &TAU_2_VSJET_ID_SF,
        &TAU_2_VSELE_ID_SF,
        &TAU_2_VSMU_ID_SF,
        &ELE_1_ID_SF,
    ]
        .into_iter()
        .map(|p| Arc::clone(p))
        .collect()
}
