//! NanoAOD branches read by the catalog

#![allow(missing_docs)]

use nanoflow_quantity::Quantity;

// Event identifiers
pub const RUN: Quantity = Quantity::nano_aod("run");
pub const LUMINOSITY_BLOCK: Quantity = Quantity::nano_aod("luminosityBlock");
pub const EVENT: Quantity = Quantity::nano_aod("event");

// Taus
pub const TAU_PT: Quantity = Quantity::nano_aod("Tau_pt");
pub const TAU_ETA: Quantity = Quantity::nano_aod("Tau_eta");
pub const TAU_PHI: Quantity = Quantity::nano_aod("Tau_phi");
pub const TAU_MASS: Quantity = Quantity::nano_aod("Tau_mass");
pub const TAU_DZ: Quantity = Quantity::nano_aod("Tau_dz");
pub const TAU_DXY: Quantity = Quantity::nano_aod("Tau_dxy");
pub const TAU_CHARGE: Quantity = Quantity::nano_aod("Tau_charge");
pub const TAU_DECAY_MODE: Quantity = Quantity::nano_aod("Tau_decayMode");
pub const TAU_GEN_MATCH: Quantity = Quantity::nano_aod("Tau_genPartFlav");
pub const TAU_ID_RAW: Quantity = Quantity::nano_aod("Tau_rawDeepTau2017v2p1VSjet");
pub const TAU_INDEX_TO_GEN: Quantity = Quantity::nano_aod("Tau_genPartIdx");
pub const TAU_ASSOCIATED_JET: Quantity = Quantity::nano_aod("Tau_jetIdx");

// Muons
pub const MUON_PT: Quantity = Quantity::nano_aod("Muon_pt");
pub const MUON_ETA: Quantity = Quantity::nano_aod("Muon_eta");
pub const MUON_PHI: Quantity = Quantity::nano_aod("Muon_phi");
pub const MUON_MASS: Quantity = Quantity::nano_aod("Muon_mass");
pub const MUON_ISO: Quantity = Quantity::nano_aod("Muon_pfRelIso04_all");
pub const MUON_DZ: Quantity = Quantity::nano_aod("Muon_dz");
pub const MUON_DXY: Quantity = Quantity::nano_aod("Muon_dxy");
pub const MUON_CHARGE: Quantity = Quantity::nano_aod("Muon_charge");
pub const MUON_GEN_MATCH: Quantity = Quantity::nano_aod("Muon_genPartFlav");
pub const MUON_INDEX_TO_GEN: Quantity = Quantity::nano_aod("Muon_genPartIdx");

// Electrons
pub const ELECTRON_PT: Quantity = Quantity::nano_aod("Electron_pt");
pub const ELECTRON_ETA: Quantity = Quantity::nano_aod("Electron_eta");
pub const ELECTRON_DXY: Quantity = Quantity::nano_aod("Electron_dxy");
pub const ELECTRON_DZ: Quantity = Quantity::nano_aod("Electron_dz");
pub const ELECTRON_PHI: Quantity = Quantity::nano_aod("Electron_phi");
pub const ELECTRON_MASS: Quantity = Quantity::nano_aod("Electron_mass");
pub const ELECTRON_ISO: Quantity = Quantity::nano_aod("Electron_pfRelIso03_all");
pub const ELECTRON_CHARGE: Quantity = Quantity::nano_aod("Electron_charge");

// Jets
pub const GEN_JET_PT: Quantity = Quantity::nano_aod("GenJet_pt");
pub const GEN_JET_ETA: Quantity = Quantity::nano_aod("GenJet_eta");
pub const GEN_JET_PHI: Quantity = Quantity::nano_aod("GenJet_phi");
pub const JET_ETA: Quantity = Quantity::nano_aod("Jet_eta");
pub const JET_PHI: Quantity = Quantity::nano_aod("Jet_phi");
pub const JET_PT: Quantity = Quantity::nano_aod("Jet_pt");
pub const JET_MASS: Quantity = Quantity::nano_aod("Jet_mass");
pub const JET_ID: Quantity = Quantity::nano_aod("Jet_jetId");
pub const JET_ASSOCIATED_GEN_JET: Quantity = Quantity::nano_aod("Jet_genJetIdx");
pub const BJET_DISCRIMINATOR: Quantity = Quantity::nano_aod("Jet_btagDeepFlavB");

// Pileup
pub const PILEUP_N_TRUE_INT: Quantity = Quantity::nano_aod("Pileup_nTrueInt");
pub const RHO: Quantity = Quantity::nano_aod("Pileup_pudensity");

// Generator particles
pub const GEN_PARTICLE_ETA: Quantity = Quantity::nano_aod("GenPart_eta");
pub const GEN_PARTICLE_PHI: Quantity = Quantity::nano_aod("GenPart_phi");
pub const GEN_PARTICLE_PT: Quantity = Quantity::nano_aod("GenPart_pt");
pub const GEN_PARTICLE_MASS: Quantity = Quantity::nano_aod("GenPart_mass");
pub const GEN_PARTICLE_PDG_ID: Quantity = Quantity::nano_aod("GenPart_pdgId");
pub const GEN_PARTICLE_STATUS: Quantity = Quantity::nano_aod("GenPart_status");
pub const GEN_PARTICLE_STATUS_FLAGS: Quantity = Quantity::nano_aod("GenPart_statusFlags");

// Trigger objects
pub const TRIGGER_OBJECT_BIT: Quantity = Quantity::nano_aod("TrigObj_filterBits");
pub const TRIGGER_OBJECT_PT: Quantity = Quantity::nano_aod("TrigObj_pt");
pub const TRIGGER_OBJECT_ETA: Quantity = Quantity::nano_aod("TrigObj_eta");
pub const TRIGGER_OBJECT_PHI: Quantity = Quantity::nano_aod("TrigObj_phi");
pub const TRIGGER_OBJECT_ID: Quantity = Quantity::nano_aod("TrigObj_id");

// Simplified template cross sections
pub const HTXS_HIGGS_PT: Quantity = Quantity::nano_aod("HTXS_Higgs_pt");
pub const HTXS_NJETS30: Quantity = Quantity::nano_aod("HTXS_njets30");
pub const HTXS_STAGE_0: Quantity = Quantity::nano_aod("HTXS_stage_0");
pub const HTXS_STAGE_1_PTJET30: Quantity = Quantity::nano_aod("HTXS_stage_1_pTjet30");
pub const HTXS_STAGE1_1_FINE_CAT_PTJET30GEV: Quantity =
    Quantity::nano_aod("HTXS_stage1_1_fine_cat_pTjet30GeV");
pub const HTXS_STAGE1_2_CAT_PTJET30GEV: Quantity =
    Quantity::nano_aod("HTXS_stage1_2_cat_pTjet30GeV");
pub const HTXS_STAGE1_2_FINE_CAT_PTJET30GEV: Quantity =
    Quantity::nano_aod("HTXS_stage1_2_fine_cat_pTjet30GeV");

// Missing transverse energy
pub const MET_COV_XX: Quantity = Quantity::nano_aod("MET_covXX");
pub const MET_COV_XY: Quantity = Quantity::nano_aod("MET_covXY");
pub const MET_COV_YY: Quantity = Quantity::nano_aod("MET_covYY");
pub const MET_SIGNIFICANCE: Quantity = Quantity::nano_aod("MET_significance");
pub const MET_PHI: Quantity = Quantity::nano_aod("PuppiMET_phi");
pub const MET_PT: Quantity = Quantity::nano_aod("PuppiMET_pt");
pub const MET_SUM_ET: Quantity = Quantity::nano_aod("PuppiMET_sumEt");

/// Every branch above, in declaration order
pub const ALL: &[Quantity] = &[
    RUN,
    LUMINOSITY_BLOCK,
    EVENT,
    TAU_PT,
    TAU_ETA,
    TAU_PHI,
    TAU_MASS,
    TAU_DZ,
    TAU_DXY,
    TAU_CHARGE,
    TAU_DECAY_MODE,
    TAU_GEN_MATCH,
    TAU_ID_RAW,
    TAU_INDEX_TO_GEN,
    TAU_ASSOCIATED_JET,
    MUON_PT,
    MUON_ETA,
    MUON_PHI,
    MUON_MASS,
    MUON_ISO,
    MUON_DZ,
    MUON_DXY,
    MUON_CHARGE,
    MUON_GEN_MATCH,
    MUON_INDEX_TO_GEN,
    ELECTRON_PT,
    ELECTRON_ETA,
    ELECTRON_DXY,
    ELECTRON_DZ,
    ELECTRON_PHI,
    ELECTRON_MASS,
    ELECTRON_ISO,
    ELECTRON_CHARGE,
    GEN_JET_PT,
    GEN_JET_ETA,
    GEN_JET_PHI,
    JET_ETA,
    JET_PHI,
    JET_PT,
    JET_MASS,
    JET_ID,
    JET_ASSOCIATED_GEN_JET,
    BJET_DISCRIMINATOR,
    PILEUP_N_TRUE_INT,
    RHO,
    GEN_PARTICLE_ETA,
    GEN_PARTICLE_PHI,
    GEN_PARTICLE_PT,
    GEN_PARTICLE_MASS,
    GEN_PARTICLE_PDG_ID,
    GEN_PARTICLE_STATUS,
    GEN_PARTICLE_STATUS_FLAGS,
    TRIGGER_OBJECT_BIT,
    TRIGGER_OBJECT_PT,
    TRIGGER_OBJECT_ETA,
    TRIGGER_OBJECT_PHI,
    TRIGGER_OBJECT_ID,
    HTXS_HIGGS_PT,
    HTXS_NJETS30,
    HTXS_STAGE_0,
    HTXS_STAGE_1_PTJET30,
    HTXS_STAGE1_1_FINE_CAT_PTJET30GEV,
    HTXS_STAGE1_2_CAT_PTJET30GEV,
    HTXS_STAGE1_2_FINE_CAT_PTJET30GEV,
    MET_COV_XX,
    MET_COV_XY,
    MET_COV_YY,
    MET_SIGNIFICANCE,
    MET_PHI,
    MET_PT,
    MET_SUM_ET,
];
