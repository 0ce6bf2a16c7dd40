//! Command line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Run configuration (.toml, .yaml, .yml or .json)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// Build the `nanoflow` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("nanoflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve and render NanoAOD producer plans")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit log records as JSON"),
        )
        .subcommand(
            Command::new("list")
                .about("List catalog producers")
                .arg(
                    Arg::new("scope")
                        .long("scope")
                        .short('s')
                        .help("Only producers valid in this scope"),
                ),
        )
        .subcommand(Command::new("validate").about("Check structural consistency of the catalog"))
        .subcommand(
            Command::new("resolve")
                .about("Order the configured producers per scope")
                .arg(config_arg())
                .arg(json_arg())
                .arg(
                    Arg::new("no-optimize")
                        .long("no-optimize")
                        .action(ArgAction::SetTrue)
                        .help("Keep producers no requested output depends on"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the call statements of every configured scope")
                .arg(config_arg())
                .arg(json_arg()),
        )
}
