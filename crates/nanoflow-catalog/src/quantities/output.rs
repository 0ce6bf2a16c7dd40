//! Derived quantities written by catalog producers
//!
//! Every column here may be requested as an ntuple output. Masks and pair
//! indices are usually consumed by later producers only.

#![allow(missing_docs)]

use nanoflow_quantity::Quantity;

// Event weights
pub const LUMI: Quantity = Quantity::derived("lumi");
pub const PUWEIGHT: Quantity = Quantity::derived("puweight");
pub const ZPT_MASS_REWEIGHT_WEIGHT: Quantity = Quantity::derived("ZPtMassReweightWeight");
pub const TOP_PT_REWEIGHT_WEIGHT: Quantity = Quantity::derived("topPtReweightWeight");
pub const GGH_NNLO_WEIGHT: Quantity = Quantity::derived("ggh_NNLO_weight");

// Theory uncertainties, gluon fusion
pub const THU_GGH_MU: Quantity = Quantity::derived("THU_ggH_Mu");
pub const THU_GGH_RES: Quantity = Quantity::derived("THU_ggH_Res");
pub const THU_GGH_MIG01: Quantity = Quantity::derived("THU_ggH_Mig01");
pub const THU_GGH_MIG12: Quantity = Quantity::derived("THU_ggH_Mig12");
pub const THU_GGH_VBF2J: Quantity = Quantity::derived("THU_ggH_VBF2j");
pub const THU_GGH_VBF3J: Quantity = Quantity::derived("THU_ggH_VBF3j");
pub const THU_GGH_PT60: Quantity = Quantity::derived("THU_ggH_PT60");
pub const THU_GGH_PT120: Quantity = Quantity::derived("THU_ggH_PT120");
pub const THU_GGH_QMTOP: Quantity = Quantity::derived("THU_ggH_qmtop");

// Theory uncertainties, vector boson fusion
pub const THU_QQH_TOT: Quantity = Quantity::derived("THU_qqH_TOT");
pub const THU_QQH_PTH200: Quantity = Quantity::derived("THU_qqH_PTH200");
pub const THU_QQH_MJJ60: Quantity = Quantity::derived("THU_qqH_Mjj60");
pub const THU_QQH_MJJ120: Quantity = Quantity::derived("THU_qqH_Mjj120");
pub const THU_QQH_MJJ350: Quantity = Quantity::derived("THU_qqH_Mjj350");
pub const THU_QQH_MJJ700: Quantity = Quantity::derived("THU_qqH_Mjj700");
pub const THU_QQH_MJJ1000: Quantity = Quantity::derived("THU_qqH_Mjj1000");
pub const THU_QQH_MJJ1500: Quantity = Quantity::derived("THU_qqH_Mjj1500");
pub const THU_QQH_25: Quantity = Quantity::derived("THU_qqH_25");
pub const THU_QQH_JET01: Quantity = Quantity::derived("THU_qqH_JET01");

// Object masks
pub const BASE_MUONS_MASK: Quantity = Quantity::derived("base_muons_mask");
pub const GOOD_MUONS_MASK: Quantity = Quantity::derived("good_muons_mask");
pub const VETO_MUONS_MASK: Quantity = Quantity::derived("veto_muons_mask");
pub const BASE_ELECTRONS_MASK: Quantity = Quantity::derived("base_electrons_mask");
pub const GOOD_ELECTRONS_MASK: Quantity = Quantity::derived("good_electrons_mask");
pub const BASE_TAUS_MASK: Quantity = Quantity::derived("base_taus_mask");

// Vetoes
pub const MUON_VETO_FLAG: Quantity = Quantity::derived("extramuon_veto");
pub const DIMUON_VETO: Quantity = Quantity::derived("dimuon_veto");
pub const DIELECTRON_VETO: Quantity = Quantity::derived("dielectron_veto");
pub const DILEPTON_VETO: Quantity = Quantity::derived("dilepton_veto");

// Pair selection
pub const DITAUPAIR: Quantity = Quantity::derived("ditaupair");
pub const P4_1: Quantity = Quantity::derived("p4_1");
pub const P4_2: Quantity = Quantity::derived("p4_2");
pub const PT_1: Quantity = Quantity::derived("pt_1");
pub const ETA_1: Quantity = Quantity::derived("eta_1");
pub const PT_2: Quantity = Quantity::derived("pt_2");
pub const ETA_2: Quantity = Quantity::derived("eta_2");
pub const DECAYMODE_2: Quantity = Quantity::derived("decaymode_2");
pub const GEN_MATCH_2: Quantity = Quantity::derived("gen_match_2");

// Generator level
pub const RECOIL_GENBOSON_P4: Quantity = Quantity::derived("recoil_genboson_p4");

// Scale factors
pub const ID_WGT_MU_1: Quantity = Quantity::derived("id_wgt_mu_1");
pub const ISO_WGT_MU_1: Quantity = Quantity::derived("iso_wgt_mu_1");
pub const ID_WGT_ELE_1: Quantity = Quantity::derived("id_wgt_ele_1");
pub const ID_WGT_TAU_VSJET_2: Quantity = Quantity::derived("id_wgt_tau_vsJet_2");
pub const ID_WGT_TAU_VSELE_2: Quantity = Quantity::derived("id_wgt_tau_vsEle_2");
pub const ID_WGT_TAU_VSMU_2: Quantity = Quantity::derived("id_wgt_tau_vsMu_2");
