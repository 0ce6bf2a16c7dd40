//! Subcommand implementations
//!
//! Every command returns its report as a string; printing and exit codes
//! are left to the binary.

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use nanoflow_codegen::{RenderPlan, RenderedPlan, RunConfig};
use nanoflow_graph::{ProducerRegistry, ResolvedPlan, Resolver};
use nanoflow_quantity::Scope;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Dispatch a parsed command line
///
/// # Errors
/// Any failure of the selected subcommand, with context.
pub fn run(matches: &ArgMatches) -> Result<String> {
    let registry = nanoflow_catalog::default_registry().context("building producer catalog")?;

    match matches.subcommand() {
        Some(("list", args)) => Ok(list(
            &registry,
            args.get_one::<String>("scope").map(String::as_str),
        )),
        Some(("validate", _)) => validate(&registry),
        Some(("resolve", args)) => {
            let config = config_path(args)?;
            resolve(
                &registry,
                config,
                args.get_flag("json"),
                !args.get_flag("no-optimize"),
            )
        }
        Some(("render", args)) => render(&registry, config_path(args)?, args.get_flag("json")),
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}

fn config_path(args: &ArgMatches) -> Result<&Path> {
    args.get_one::<PathBuf>("config")
        .map(PathBuf::as_path)
        .context("--config is required")
}

fn load_config(path: &Path) -> Result<RunConfig> {
    RunConfig::load(path).with_context(|| format!("loading run config {}", path.display()))
}

/// Producers in registration order, optionally restricted to one scope
#[must_use]
pub fn list(registry: &ProducerRegistry, scope: Option<&str>) -> String {
    let scope = scope.map(Scope::new);
    let mut out = String::new();
    for producer in registry.iter() {
        if scope.as_ref().is_some_and(|s| !producer.is_valid_in(s)) {
            continue;
        }
        let names: Vec<String> = producer.outputs().iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{producer} -> [{}]", names.join(", "));
    }
    out
}

/// Validate the catalog
///
/// # Errors
/// Lists every issue found.
pub fn validate(registry: &ProducerRegistry) -> Result<String> {
    let report = registry.validate();
    if !report.is_valid() {
        let issues: Vec<String> = report.issues.iter().map(|i| format!("  - {i}")).collect();
        bail!(
            "catalog has {} issue(s):\n{}",
            report.issues.len(),
            issues.join("\n")
        );
    }
    Ok(format!(
        "catalog valid: {} producers in {} scopes",
        report.producer_count, report.scope_count
    ))
}

fn resolve_config(
    registry: &ProducerRegistry,
    config: &RunConfig,
    optimize: bool,
) -> Result<ResolvedPlan> {
    Resolver::new(registry)
        .with_optimize(optimize)
        .resolve(&config.to_request())
        .context("resolving producer plan")
}

/// Resolve the configured producers
///
/// # Errors
/// Config loading or resolution failures.
pub fn resolve(
    registry: &ProducerRegistry,
    config: &Path,
    json: bool,
    optimize: bool,
) -> Result<String> {
    let config = load_config(config)?;
    tracing::info!(era = %config.era, sample = %config.sample, "resolving");
    let plan = resolve_config(registry, &config, optimize)?;

    if json {
        return serde_json::to_string_pretty(&plan).context("serializing plan");
    }

    let mut out = String::new();
    for scope in &plan.scopes {
        let _ = writeln!(out, "[{}]", scope.scope);
        for (i, producer) in scope.producers.iter().enumerate() {
            let _ = writeln!(out, "{:>4}. {}", i + 1, producer.name());
        }
        if !scope.outputs.is_empty() {
            let outputs: Vec<&str> = scope.outputs.iter().map(|q| q.name()).collect();
            let _ = writeln!(out, "  outputs: {}", outputs.join(", "));
        }
        if !scope.pruned.is_empty() {
            let _ = writeln!(out, "  pruned: {}", scope.pruned.join(", "));
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct RenderReport<'a> {
    fingerprint: String,
    #[serde(flatten)]
    plan: &'a RenderedPlan,
}

/// Render the configured producers
///
/// # Errors
/// Config loading, resolution or rendering failures.
pub fn render(registry: &ProducerRegistry, config: &Path, json: bool) -> Result<String> {
    let config = load_config(config)?;
    let plan = resolve_config(registry, &config, true)?;
    let rendered = plan.render(&config).context("rendering producer calls")?;
    let fingerprint = rendered.fingerprint();

    if json {
        let report = RenderReport {
            fingerprint,
            plan: &rendered,
        };
        return serde_json::to_string_pretty(&report).context("serializing rendered plan");
    }

    let mut out = String::new();
    for scope in &rendered.scopes {
        let _ = writeln!(out, "// scope: {}", scope.scope);
        let _ = writeln!(out, "{}", scope.code());
        if !scope.outputs.is_empty() {
            let outputs: Vec<&str> = scope.outputs.iter().map(|q| q.name()).collect();
            let _ = writeln!(out, "// outputs: {}", outputs.join(", "));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "// fingerprint: {fingerprint}");
    Ok(out)
}
