//! Event-level filters and weights

use super::electrons::DI_ELECTRON_VETO;
use super::muons::DI_MUON_VETO;
use super::{ALL_SCOPES, GLOBAL};
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Keep events whose run, lumi or event numbers match a selection
pub static RUN_LUMI_EVENT_FILTER: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::vector("RunLumiEventFilter")
        .call(
            r#"basefunctions::FilterIntSelection<{RunLumiEventFilter_Quantity_Types}>({df}, "{RunLumiEventFilter_Quantities}", {vec_open}{RunLumiEventFilter_Selections}{vec_close}, "RunLumiEventFilter")"#,
        )
        .no_output()
        .scopes(GLOBAL)
        .vec_configs(&[
            "RunLumiEventFilter_Quantities",
            "RunLumiEventFilter_Quantity_Types",
            "RunLumiEventFilter_Selections",
        ])
        .build()
});

/// One filter call per configured MET filter flag
pub static MET_FILTER: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::vector("MetFilter")
        .call(r#"metfilter::ApplyMetFilter({df}, "{met_filters}", "{met_filters}")"#)
        .no_output()
        .scopes(GLOBAL)
        .vec_configs(&["met_filters"])
        .build()
});

pub static LUMI: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("Lumi")
        .call("basefunctions::rename<UInt_t>({df}, {input}, {output})")
        .inputs([nanoaod::LUMINOSITY_BLOCK])
        .outputs([q::LUMI])
        .scopes(GLOBAL)
        .build()
});

pub static PU_WEIGHTS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("PUweights")
        .call(r#"reweighting::puweights({df}, {output}, {input}, "{PU_reweighting_file}", "{PU_reweighting_hist}")"#)
        .inputs([nanoaod::PILEUP_N_TRUE_INT])
        .outputs([q::PUWEIGHT])
        .scopes(GLOBAL)
        .build()
});

pub static ZPT_MASS_REWEIGHTING: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ZPtMassReweighting")
        .call(r#"reweighting::zPtMassReweighting({df}, {output}, {input}, "{zptmass_file}", "{zptmass_functor}", "{zptmass_arguments}")"#)
        .inputs([q::RECOIL_GENBOSON_P4])
        .outputs([q::ZPT_MASS_REWEIGHT_WEIGHT])
        .scopes(ALL_SCOPES)
        .build()
});

pub static TOP_PT_REWEIGHTING: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("TopPtReweighting")
        .call("reweighting::topptreweighting({df}, {output}, {input})")
        .inputs([
            nanoaod::GEN_PARTICLE_PDG_ID,
            nanoaod::GEN_PARTICLE_STATUS_FLAGS,
            nanoaod::GEN_PARTICLE_PT,
        ])
        .outputs([q::TOP_PT_REWEIGHT_WEIGHT])
        .scopes(ALL_SCOPES)
        .build()
});

/// Flag events with a second same-flavour lepton pair
pub static DI_LEPTON_VETO: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("DiLeptonVeto")
        .call("basefunctions::CombineFlagsAny({df}, {output}, {input})")
        .outputs([q::DILEPTON_VETO])
        .scopes(GLOBAL)
        .subproducers([Arc::clone(&DI_ELECTRON_VETO), Arc::clone(&DI_MUON_VETO)])
        .build()
});

pub static GGH_NNLO_REWEIGHTING: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GGH_NNLO_Reweighting")
        .call(r#"htxs::ggHNLLOWeights({df}, {output}, "{ggHNNLOweightsRootfile}", "{ggH_generator}", {input})"#)
        .inputs([nanoaod::HTXS_HIGGS_PT, nanoaod::HTXS_NJETS30])
        .outputs([q::GGH_NNLO_WEIGHT])
        .scopes(ALL_SCOPES)
        .build()
});

/// Gluon-fusion theory uncertainties; reads the stage 1 flag the macro expects
pub static GGH_WG1_UNCERTAINTIES: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GGH_WG1_Uncertainties")
        .call("htxs::ggH_WG1_uncertainties({df}, {output_vec}, {input})")
        .inputs([
            nanoaod::HTXS_STAGE_1_PTJET30,
            nanoaod::HTXS_HIGGS_PT,
            nanoaod::HTXS_NJETS30,
        ])
        .outputs([
            q::THU_GGH_MU,
            q::THU_GGH_RES,
            q::THU_GGH_MIG01,
            q::THU_GGH_MIG12,
            q::THU_GGH_VBF2J,
            q::THU_GGH_VBF3J,
            q::THU_GGH_PT60,
            q::THU_GGH_PT120,
            q::THU_GGH_QMTOP,
        ])
        .scopes(ALL_SCOPES)
        .build()
});

/// Vector-boson-fusion theory uncertainties; reads the fine stage 1.1 flag
pub static QQH_WG1_UNCERTAINTIES: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("QQH_WG1_Uncertainties")
        .call("htxs::qqH_WG1_uncertainties({df}, {output_vec}, {input})")
        .inputs([nanoaod::HTXS_STAGE1_1_FINE_CAT_PTJET30GEV])
        .outputs([
            q::THU_QQH_TOT,
            q::THU_QQH_PTH200,
            q::THU_QQH_MJJ60,
            q::THU_QQH_MJJ120,
            q::THU_QQH_MJJ350,
            q::THU_QQH_MJJ700,
            q::THU_QQH_MJJ1000,
            q::THU_QQH_MJJ1500,
            q::THU_QQH_25,
            q::THU_QQH_JET01,
        ])
        .scopes(ALL_SCOPES)
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    [
        &RUN_LUMI_EVENT_FILTER,
        &MET_FILTER,
        &LUMI,
        &PU_WEIGHTS,
        &ZPT_MASS_REWEIGHTING,
        &TOP_PT_REWEIGHTING,
        &DI_LEPTON_VETO,
        &GGH_NNLO_REWEIGHTING,
        &GGH_WG1_UNCERTAINTIES,
        &QQH_WG1_UNCERTAINTIES,
    ]
    .into_iter()
    .map(|p| Arc::clone(p))
    .collect()
}
