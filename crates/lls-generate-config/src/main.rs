//! generate-config - merges installed external providers into config.yaml
//!
//! Runs as the last init step of a LlamaStack pod, after every provider
//! install step has written its artifacts to the shared metadata mount.

mod cli;
mod output;

use anyhow::Result;
use clap::Parser;
use lls_config::generate_or_copy;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    output::header(
        cli.base_config.as_str(),
        cli.metadata_dir.as_str(),
        cli.output.as_str(),
    );

    let outcome = generate_or_copy(
        cli.base_config.as_std_path(),
        cli.metadata_dir.as_std_path(),
        cli.output.as_std_path(),
    )?;
    debug!("Generation outcome: {:?}", outcome);

    output::outcome(&outcome, cli.output.as_str());
    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
