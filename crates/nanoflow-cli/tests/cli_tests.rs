//! End-to-end tests of the command handlers

use nanoflow_cli::{build_cli, logging, run};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const DY_2018: &str = include_str!("../../../configs/dy_2018.toml");

fn config_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    logging::init_test();
    let matches = build_cli().try_get_matches_from(args.iter().copied()).unwrap();
    run(&matches)
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn missing_subcommand_rejected() {
    assert!(build_cli().try_get_matches_from(["nanoflow"]).is_err());
}

#[test]
fn resolve_requires_config() {
    assert!(build_cli()
        .try_get_matches_from(["nanoflow", "resolve"])
        .is_err());
}

#[test]
fn validate_default_catalog() {
    let output = run_args(&["nanoflow", "validate"]).unwrap();
    assert!(output.starts_with("catalog valid: "), "{output}");
    assert!(output.ends_with("in 5 scopes"), "{output}");
}

#[test]
fn list_filters_by_scope() {
    let all = run_args(&["nanoflow", "list"]).unwrap();
    let mt = run_args(&["nanoflow", "list", "--scope", "mt"]).unwrap();

    assert!(all.lines().count() > mt.lines().count());
    assert!(mt.lines().any(|l| l.starts_with("MuTauPairSelection ")));
    assert!(!mt.lines().any(|l| l.starts_with("ElMuPairSelection ")));
    assert!(mt.lines().any(|l| l.starts_with("GoodMuons ") && l.ends_with("[good_muons_mask]")));
}

#[test]
fn resolve_text_lists_scopes_in_order() {
    let config = config_file(DY_2018, ".toml");
    let path = config.path().to_str().unwrap();

    let output = run_args(&["nanoflow", "resolve", "--config", path]).unwrap();
    let headers: Vec<&str> = output.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(headers, ["[global]", "[mt]", "[em]"]);
    assert!(output.contains("MetFilter"));
}

#[test]
fn resolve_json_matches_plan() {
    let config = config_file(DY_2018, ".toml");
    let path = config.path().to_str().unwrap();

    let output = run_args(&["nanoflow", "resolve", "--config", path, "--json"]).unwrap();
    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    let scopes = plan["scopes"].as_array().unwrap();

    assert_eq!(scopes.len(), 3);
    assert_eq!(scopes[0]["scope"], "global");
    assert_eq!(scopes[0]["producers"][0], "MetFilter");
    assert_eq!(scopes[1]["outputs"].as_array().unwrap().len(), 12);
}

#[test]
fn no_optimize_never_prunes() {
    let config = config_file(DY_2018, ".toml");
    let path = config.path().to_str().unwrap();

    let output = run_args(&["nanoflow", "resolve", "--config", path, "--json", "--no-optimize"]).unwrap();
    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    for scope in plan["scopes"].as_array().unwrap() {
        assert_eq!(scope["pruned"], serde_json::json!([]));
    }
}

#[test]
fn render_text_ends_with_fingerprint() {
    let config = config_file(DY_2018, ".toml");
    let path = config.path().to_str().unwrap();

    let output = run_args(&["nanoflow", "render", "--config", path]).unwrap();
    assert!(output.starts_with("// scope: global\nauto df1 = "), "{output}");
    let fingerprint = output
        .lines()
        .last()
        .and_then(|l| l.strip_prefix("// fingerprint: "))
        .unwrap();
    assert_eq!(fingerprint.len(), 64);
}

#[test]
fn render_json_is_reproducible() {
    let config = config_file(DY_2018, ".toml");
    let path = config.path().to_str().unwrap();

    let first = run_args(&["nanoflow", "render", "--config", path, "--json"]).unwrap();
    let second = run_args(&["nanoflow", "render", "--config", path, "--json"]).unwrap();
    assert_eq!(first, second);

    let report: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 64);
    assert_eq!(report["scopes"][0]["calls"][0]["input_df"], "df0");
}

#[test]
fn missing_config_reports_path() {
    let err = run_args(&["nanoflow", "render", "--config", "/nonexistent/run.toml"]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("loading run config /nonexistent/run.toml"), "{message}");
}

#[test]
fn unresolved_producer_reported() {
    let config = config_file(
        r#"
scopes = ["global", "mt"]
[producers]
mt = ["GoodMuons"]
"#,
        ".toml",
    );
    let path = config.path().to_str().unwrap();

    let err = run_args(&["nanoflow", "resolve", "--config", path]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("resolving producer plan: "), "{message}");
    assert!(message.contains("base_muons_mask"), "{message}");
}
