//! nanoflow binary

use nanoflow_cli::{build_cli, logging, run};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
