//! Testing utilities for nanoflow workspace
//!
//! Shared producer fixtures, parameter tables and run configurations.

#![allow(missing_docs)]

use nanoflow_producer::{ParamTable, ParamValue, Producer, ProducerRef};
use nanoflow_quantity::Quantity;

pub const MUON_PT: Quantity = Quantity::nano_aod("Muon_pt");
pub const MUON_ETA: Quantity = Quantity::nano_aod("Muon_eta");
pub const MUON_ISO: Quantity = Quantity::nano_aod("Muon_pfRelIso04_all");
pub const LUMI_BLOCK: Quantity = Quantity::nano_aod("luminosityBlock");

pub const BASE_MUONS_MASK: Quantity = Quantity::derived("base_muons_mask");
pub const GOOD_MUONS_MASK: Quantity = Quantity::derived("good_muons_mask");
pub const LUMI: Quantity = Quantity::derived("lumi");

pub fn muon_pt_cut() -> ProducerRef {
    Producer::builder("MuonPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_muon_pt})")
        .inputs([MUON_PT])
        .internal_output()
        .scopes(&["global"])
        .build()
}

pub fn muon_eta_cut() -> ProducerRef {
    Producer::builder("MuonEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_muon_eta})")
        .inputs([MUON_ETA])
        .internal_output()
        .scopes(&["global"])
        .build()
}

pub fn base_muons() -> ProducerRef {
    Producer::group("BaseMuons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .outputs([BASE_MUONS_MASK])
        .scopes(&["global"])
        .subproducers([muon_pt_cut(), muon_eta_cut()])
        .build()
}

pub fn good_muons() -> ProducerRef {
    let iso = Producer::builder("GoodMuonIsoCut")
        .call("physicsobject::muon::CutIsolation({df}, {output}, {input}, {muon_iso_cut})")
        .inputs([MUON_ISO])
        .internal_output()
        .scopes(&["mt"])
        .build();
    Producer::group("GoodMuons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .inputs([BASE_MUONS_MASK])
        .outputs([GOOD_MUONS_MASK])
        .scopes(&["mt"])
        .subproducers([iso])
        .build()
}

pub fn lumi() -> ProducerRef {
    Producer::builder("Lumi")
        .call("basefunctions::rename<UInt_t>({df}, {input}, {output})")
        .inputs([LUMI_BLOCK])
        .outputs([LUMI])
        .scopes(&["global"])
        .build()
}

pub fn met_filter() -> ProducerRef {
    Producer::vector("MetFilter")
        .call(r#"metfilter::ApplyMetFilter({df}, "{met_filters}", "{met_filters}")"#)
        .no_output()
        .scopes(&["global"])
        .vec_configs(&["met_filters"])
        .build()
}

/// Every fixture producer, groups after their sub-producers
pub fn muon_chain() -> Vec<ProducerRef> {
    vec![met_filter(), lumi(), base_muons(), good_muons()]
}

pub fn muon_params() -> ParamTable {
    let mut params = ParamTable::new();
    params.insert("min_muon_pt".into(), ParamValue::Float(20.0));
    params.insert("max_muon_eta".into(), ParamValue::Float(2.1));
    params.insert("muon_iso_cut".into(), ParamValue::Float(0.15));
    params.insert(
        "met_filters".into(),
        ParamValue::from(vec!["Flag_goodVertices", "Flag_METFilters"]),
    );
    params
}

/// Linear chain `Step0 -> Step1 -> ...` where each step reads the previous
/// step's output
pub fn linear_chain(len: usize) -> Vec<ProducerRef> {
    (0..len)
        .map(|i| {
            let input = if i == 0 {
                Quantity::nano_aod("Muon_pt")
            } else {
                Quantity::new(format!("step{}", i - 1), Default::default())
            };
            Producer::builder(format!("Step{i}"))
                .call("basefunctions::rename<float>({df}, {input}, {output})")
                .inputs([input])
                .outputs([Quantity::new(format!("step{i}"), Default::default())])
                .scopes(&["global"])
                .build()
        })
        .collect()
}

pub const MT_CONFIG_TOML: &str = r#"
era = "2018"
sample = "dy"
scopes = ["global", "mt"]

[parameters.global]
min_muon_pt = 20.0
max_muon_eta = 2.1
met_filters = ["Flag_goodVertices", "Flag_METFilters"]

[parameters.mt]
muon_iso_cut = 0.15

[producers]
global = ["MetFilter", "Lumi", "BaseMuons"]
mt = ["GoodMuons"]

[outputs]
global = ["lumi"]
mt = ["good_muons_mask"]
"#;
