use nanoflow_catalog::producers::{electrons, muons};
use nanoflow_catalog::quantities::{nanoaod, output};
use nanoflow_catalog::{all_producers, default_registry};
use nanoflow_codegen::{RenderPlan, RunConfig};
use nanoflow_graph::{ResolveError, ResolveRequest, Resolver};
use nanoflow_quantity::Scope;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;

const DY_2018: &str = include_str!("../../../configs/dy_2018.toml");

#[test]
fn catalog_passes_validation() {
    let registry = default_registry().unwrap();
    let report = registry.validate();

    assert!(report.is_valid(), "{:#?}", report.issues);
    assert_eq!(report.scope_count, 5);
}

#[test]
fn nanoaod_branch_names_unique() {
    let names: HashSet<&str> = nanoaod::ALL.iter().map(|q| q.name()).collect();
    assert_eq!(names.len(), nanoaod::ALL.len());
    assert!(nanoaod::ALL.iter().all(|q| q.is_nano_aod()));
}

#[test]
fn groups_share_subproducer_declarations() {
    let base = muons::BASE_MUONS.subproducers();
    assert!(Arc::ptr_eq(&base[1], &muons::MUON_ETA_CUT));
    assert_eq!(
        muons::DI_MUON_VETO_MUONS.declared_inputs(),
        &nanoflow_producer::Inputs::Uniform(vec![
            muons::MUON_ETA_CUT.outputs()[0].clone(),
            muons::MUON_DXY_CUT.outputs()[0].clone(),
            muons::MUON_DZ_CUT.outputs()[0].clone(),
            muons::MUON_ISO_CUT.outputs()[0].clone(),
        ])
    );
    assert!(electrons::DI_ELECTRON_VETO_ELECTRONS.outputs()[0].is_internal());
}

#[test]
fn registering_twice_is_a_no_op() {
    let mut registry = default_registry().unwrap();
    let before = registry.len();
    nanoflow_catalog::register_all(&mut registry).unwrap();
    assert_eq!(registry.len(), before);
    assert!(before > all_producers().len());
}

#[test]
fn shared_subproducer_scheduled_once() {
    let registry = default_registry().unwrap();
    let request = ResolveRequest::new().scope(
        Scope::GLOBAL,
        ["DiLeptonVeto", "BaseMuons", "BaseElectrons"],
        ["dilepton_veto"],
    );

    let plan = Resolver::new(&registry).with_optimize(false).resolve(&request).unwrap();
    let global = plan.global().unwrap();
    let names = global.names();

    assert_eq!(names.iter().filter(|n| **n == "MuonEtaCut").count(), 1);
    assert!(global.position("MuonEtaCut").unwrap() < global.position("DiMuonVetoMuons").unwrap());
    assert!(global.position("DiMuonVeto").unwrap() < global.position("DiLeptonVeto").unwrap());
}

#[test]
fn dilepton_veto_needs_base_masks() {
    let registry = default_registry().unwrap();
    let request = ResolveRequest::new().scope(Scope::GLOBAL, ["DiLeptonVeto"], ["dilepton_veto"]);

    let err = Resolver::new(&registry).resolve(&request).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnresolvedInput {
            producer: "DiElectronVetoElectrons".into(),
            quantity: "ElectronEtaCut_output".into(),
            scope: Scope::GLOBAL,
            providers: vec!["ElectronEtaCut".into()],
        }
    );
}

#[test]
fn channel_only_producer_rejected_in_global() {
    let registry = default_registry().unwrap();
    let request = ResolveRequest::new().scope(Scope::GLOBAL, ["BaseTaus"], Vec::<String>::new());

    assert!(matches!(
        Resolver::new(&registry).resolve(&request),
        Err(ResolveError::ScopeMismatch { .. })
    ));
}

#[test]
fn full_configuration_resolves() {
    let config = RunConfig::from_toml(DY_2018).unwrap();
    let registry = default_registry().unwrap();
    let plan = Resolver::new(&registry).resolve(&config.to_request()).unwrap();

    let scopes: Vec<&str> = plan.scopes.iter().map(|s| s.scope.as_str()).collect();
    assert_eq!(scopes, ["global", "mt", "em"]);

    let mt = plan.scope(&Scope::new("mt")).unwrap();
    let pos = |name| mt.position(name).unwrap();
    assert!(pos("GoodMuons") < pos("MuTauPairSelection"));
    assert!(pos("BaseTaus") < pos("MuTauPairSelection"));
    assert!(pos("MuTauPairSelection") < pos("VetoMuons"));
    assert!(pos("VetoMuons") < pos("ExtraMuonsVeto"));
    assert!(pos("pt_1") < pos("Muon_1_ID_SF"));
    assert!(pos("gen_match_2") < pos("Tau_2_VsJetTauID_SF"));
    assert!(mt.position("UnrollLV1").is_none());
    assert!(mt.pruned.is_empty());
    assert!(pos("gen_match_2") < pos("Tau_2_VsEleTauID_SF"));
    assert!(pos("decaymode_2") < pos("Tau_2_VsMuTauID_SF"));
    assert_eq!(mt.outputs.len(), 12);

    let em = plan.scope(&Scope::new("em")).unwrap();
    assert!(em.position("LVEl1").is_some());
    assert!(em.position("LVMu1").is_none());
}

#[test]
fn full_configuration_renders() {
    let config = RunConfig::from_toml(DY_2018).unwrap();
    let registry = default_registry().unwrap();
    let plan = Resolver::new(&registry).resolve(&config.to_request()).unwrap();
    let rendered = plan.render(&config).unwrap();

    let global = rendered.scope(&Scope::GLOBAL).unwrap();
    let met_filters = global.calls.iter().filter(|c| c.producer == "MetFilter").count();
    assert_eq!(met_filters, 7);

    let mt = rendered.scope(&Scope::new("mt")).unwrap();
    assert_eq!(mt.calls[0].input_df, global.final_df);
    let veto = mt.calls.iter().find(|c| c.producer == "ExtraMuonsVeto").unwrap();
    assert_eq!(
        veto.code,
        format!(
            r#"physicsobject::LeptonVetoFlag({}, "extramuon_veto", "veto_muons_mask")"#,
            veto.input_df
        )
    );
    let dm_cut = mt.calls.iter().find(|c| c.producer == "TauDMCut").unwrap();
    assert!(dm_cut.code.ends_with("{0, 1, 10, 11})"));
    let vs_ele = mt.calls.iter().find(|c| c.producer == "Tau_2_VsEleTauID_SF").unwrap();
    assert_eq!(
        vs_ele.code,
        format!(
            r#"scalefactor::tau::id_vsEle({}, "eta_2", "decaymode_2", "gen_match_2", {{0, 1, 10, 11}}, "VVLoose", "nom", "id_wgt_tau_vsEle_2", "data/tau_corrections/tau_sf_2018_UL.json.gz", "DeepTau2017v2p1VSe")"#,
            vs_ele.input_df
        )
    );

    let em = rendered.scope(&Scope::new("em")).unwrap();
    let pt_cut = em.calls.iter().find(|c| c.producer == "GoodMuonPtCut").unwrap();
    assert!(pt_cut.code.ends_with(", 15)"));
    let eta_cut = em.calls.iter().find(|c| c.producer == "GoodMuonEtaCut").unwrap();
    assert!(eta_cut.code.ends_with(", 2.4)"));

    assert_eq!(rendered.fingerprint(), plan.render(&config).unwrap().fingerprint());
}

#[test]
fn good_muon_isolation_uses_muon_helper() {
    let call = muons::GOOD_MUON_ISO_CUT.call().unwrap();
    assert!(call.as_str().starts_with("physicsobject::muon::CutIsolation("));
    assert_eq!(call.config_keys(), ["muon_iso_cut"]);
}

#[test]
fn extra_muon_veto_reads_base_mask_without_muon_in_pair() {
    let registry = default_registry().unwrap();
    let request = ResolveRequest::new()
        .scope(Scope::GLOBAL, ["BaseMuons"], Vec::<String>::new())
        .scope(Scope::new("et"), ["ExtraMuonsVeto"], [output::MUON_VETO_FLAG.name()]);

    let plan = Resolver::new(&registry).resolve(&request).unwrap();
    let et = plan.scope(&Scope::new("et")).unwrap();
    assert_eq!(et.names(), ["ExtraMuonsVeto"]);
    assert_eq!(
        et.producers[0].call_inputs(&Scope::new("et")).unwrap(),
        vec![output::BASE_MUONS_MASK]
    );
}
