use nanoflow_codegen::{ConfigError, RenderPlan, RunConfig};
use nanoflow_graph::{ProducerRegistry, Resolver};
use nanoflow_quantity::Scope;
use nanoflow_test_utils::{muon_chain, MT_CONFIG_TOML};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn registry() -> ProducerRegistry {
    let mut registry = ProducerRegistry::new();
    registry.register_all(muon_chain()).unwrap();
    registry
}

#[test]
fn load_by_extension() {
    let dir = TempDir::new().unwrap();
    let toml_path = dir.path().join("run.toml");
    fs::write(&toml_path, MT_CONFIG_TOML).unwrap();
    let from_toml = RunConfig::load(&toml_path).unwrap();

    let json_path = dir.path().join("run.json");
    fs::write(&json_path, serde_json::to_string(&from_toml).unwrap()).unwrap();
    let from_json = RunConfig::load(&json_path).unwrap();

    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml.sample, "dy");
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = RunConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn config_drives_resolution_and_rendering() {
    let config = RunConfig::from_toml(MT_CONFIG_TOML).unwrap();
    let registry = registry();

    let plan = Resolver::new(&registry).resolve(&config.to_request()).unwrap();
    let rendered = plan.render(&config).unwrap();

    let global = rendered.scope(&Scope::GLOBAL).unwrap();
    let producers: Vec<&str> = global.calls.iter().map(|c| c.producer.as_str()).collect();
    assert_eq!(
        producers,
        ["MetFilter", "MetFilter", "Lumi", "MuonPtCut", "MuonEtaCut", "BaseMuons"]
    );

    let mt = rendered.scope(&Scope::new("mt")).unwrap();
    assert_eq!(
        mt.calls[0].code,
        r#"physicsobject::muon::CutIsolation(df6, "GoodMuonIsoCut_output", "Muon_pfRelIso04_all", 0.15)"#
    );
    assert_eq!(mt.outputs[0].name(), "good_muons_mask");
}

#[test]
fn rendering_is_reproducible() {
    let config = RunConfig::from_toml(MT_CONFIG_TOML).unwrap();
    let registry = registry();
    let resolver = Resolver::new(&registry);

    let first = resolver.resolve(&config.to_request()).unwrap().render(&config).unwrap();
    let second = resolver.resolve(&config.to_request()).unwrap().render(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}
