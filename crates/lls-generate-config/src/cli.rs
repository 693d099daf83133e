//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use lls_core::paths::{DEFAULT_BASE_CONFIG, DEFAULT_OUTPUT_CONFIG, METADATA_DIR_PATH};

/// Merge installed external providers into the LlamaStack config.yaml
#[derive(Parser, Debug)]
#[command(name = "generate-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing one metadata subdirectory per installed provider
    #[arg(long, env = "LLS_METADATA_DIR", default_value = METADATA_DIR_PATH)]
    pub metadata_dir: Utf8PathBuf,

    /// Path to the base config.yaml
    #[arg(long, env = "LLS_BASE_CONFIG", default_value = DEFAULT_BASE_CONFIG)]
    pub base_config: Utf8PathBuf,

    /// Path where the merged config.yaml is written
    #[arg(long, env = "LLS_OUTPUT_CONFIG", default_value = DEFAULT_OUTPUT_CONFIG)]
    pub output: Utf8PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
