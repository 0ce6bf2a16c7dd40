//! Electron selection masks and the di-electron veto

use super::{EM_ET, GLOBAL};
use crate::quantities::{nanoaod, output as q};
use nanoflow_producer::{Producer, ProducerRef};
use nanoflow_quantity::Quantity;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub static ELECTRON_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_ele_pt})")
        .inputs([nanoaod::ELECTRON_PT])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static ELECTRON_ETA_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_ele_eta})")
        .inputs([nanoaod::ELECTRON_ETA])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static ELECTRON_DXY_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronDxyCut")
        .call("physicsobject::CutDxy({df}, {input}, {output}, {max_ele_dxy})")
        .inputs([nanoaod::ELECTRON_DXY])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static ELECTRON_DZ_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronDzCut")
        .call("physicsobject::CutDz({df}, {input}, {output}, {max_ele_dz})")
        .inputs([nanoaod::ELECTRON_DZ])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static ELECTRON_ID_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronIDCut")
        .call(r#"physicsobject::electron::CutID({df}, {output}, "{ele_id}")"#)
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static ELECTRON_ISO_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("ElectronIsoCut")
        .call("physicsobject::electron::CutIsolation({df}, {output}, {input}, {ele_iso_cut})")
        .inputs([nanoaod::ELECTRON_ISO])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static BASE_ELECTRONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("BaseElectrons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .outputs([q::BASE_ELECTRONS_MASK])
        .scopes(GLOBAL)
        .subproducers([
            Arc::clone(&ELECTRON_PT_CUT),
            Arc::clone(&ELECTRON_ETA_CUT),
            Arc::clone(&ELECTRON_DXY_CUT),
            Arc::clone(&ELECTRON_DZ_CUT),
            Arc::clone(&ELECTRON_ID_CUT),
            Arc::clone(&ELECTRON_ISO_CUT),
        ])
        .build()
});

pub static GOOD_ELECTRON_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodElectronPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_ele_pt})")
        .inputs([nanoaod::ELECTRON_PT])
        .internal_output()
        .scopes(EM_ET)
        .build()
});

pub static GOOD_ELECTRON_ETA_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodElectronEtaCut")
        .call("physicsobject::CutEta({df}, {input}, {output}, {max_ele_eta})")
        .inputs([nanoaod::ELECTRON_ETA])
        .internal_output()
        .scopes(EM_ET)
        .build()
});

pub static GOOD_ELECTRON_ISO_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("GoodElectronIsoCut")
        .call("physicsobject::electron::CutIsolation({df}, {output}, {input}, {ele_iso_cut})")
        .inputs([nanoaod::ELECTRON_ISO])
        .internal_output()
        .scopes(EM_ET)
        .build()
});

pub static GOOD_ELECTRONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("GoodElectrons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .inputs([q::BASE_ELECTRONS_MASK])
        .outputs([q::GOOD_ELECTRONS_MASK])
        .scopes(EM_ET)
        .subproducers([
            Arc::clone(&GOOD_ELECTRON_PT_CUT),
            Arc::clone(&GOOD_ELECTRON_ETA_CUT),
            Arc::clone(&GOOD_ELECTRON_ISO_CUT),
        ])
        .build()
});

pub static DI_ELECTRON_VETO_PT_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("DiElectronVetoPtCut")
        .call("physicsobject::CutPt({df}, {input}, {output}, {min_dielectronveto_pt})")
        .inputs([nanoaod::ELECTRON_PT])
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

pub static DI_ELECTRON_VETO_ID_CUT: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::builder("DiElectronVetoIDCut")
        .call(r#"physicsobject::electron::CutCBID({df}, {output}, "{dielectronveto_id}", {dielectronveto_id_wp})"#)
        .internal_output()
        .scopes(GLOBAL)
        .build()
});

/// Reuses the eta, impact-parameter and isolation masks of [`BASE_ELECTRONS`]
pub static DI_ELECTRON_VETO_ELECTRONS: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("DiElectronVetoElectrons")
        .call("physicsobject::CombineMasks({df}, {output}, {input})")
        .inputs([
            Quantity::internal(ELECTRON_ETA_CUT.name()),
            Quantity::internal(ELECTRON_DXY_CUT.name()),
            Quantity::internal(ELECTRON_DZ_CUT.name()),
            Quantity::internal(ELECTRON_ISO_CUT.name()),
        ])
        .internal_output()
        .scopes(GLOBAL)
        .subproducers([
            Arc::clone(&DI_ELECTRON_VETO_PT_CUT),
            Arc::clone(&DI_ELECTRON_VETO_ID_CUT),
        ])
        .build()
});

pub static DI_ELECTRON_VETO: Lazy<ProducerRef> = Lazy::new(|| {
    Producer::group("DiElectronVeto")
        .call("physicsobject::CheckForDiLeptonPairs({df}, {output}, {input}, {dileptonveto_dR})")
        .inputs([
            nanoaod::ELECTRON_PT,
            nanoaod::ELECTRON_ETA,
            nanoaod::ELECTRON_PHI,
            nanoaod::ELECTRON_MASS,
            nanoaod::ELECTRON_CHARGE,
        ])
        .outputs([q::DIELECTRON_VETO])
        .scopes(GLOBAL)
        .subproducers([Arc::clone(&DI_ELECTRON_VETO_ELECTRONS)])
        .build()
});

pub(crate) fn all() -> Vec<ProducerRef> {
    [&BASE_ELECTRONS, &GOOD_ELECTRONS, &DI_ELECTRON_VETO]
        .into_iter()
        .map(|p| Arc::clone(p))
        .collect()
}
