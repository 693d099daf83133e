//! Terminal reporting for generate-config
//!
//! Progress goes to stdout and failures to stderr. Merge overrides are
//! reported by the `warn!` events of the merge engine, so the outcome line
//! only counts them.

use console::style;
use lls_config::GenerateOutcome;

/// Print the paths a run reads and writes
pub fn header(base_config: &str, metadata_dir: &str, output: &str) {
    println!(
        "{} {}",
        style("ℹ").blue().bold(),
        style("Generating LlamaStack config.yaml").bold()
    );
    kv("Base config", base_config);
    kv("Metadata dir", metadata_dir);
    kv("Output", output);
}

/// Print the result of a successful run
pub fn outcome(outcome: &GenerateOutcome, output: &str) {
    println!("{} {}", style("✓").green().bold(), outcome_message(outcome, output));
}

/// Print a failure, keeping multi-line resolutions aligned under the marker
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), indent_continuation(msg));
}

fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

fn outcome_message(outcome: &GenerateOutcome, output: &str) -> String {
    match outcome {
        GenerateOutcome::Passthrough(reason) => format!(
            "No external providers detected ({}), copied base config to: {}",
            reason, output
        ),
        GenerateOutcome::Merged { providers, warnings } => {
            let overrides = match warnings.len() {
                0 => String::new(),
                1 => " (1 base provider overridden)".to_string(),
                n => format!(" ({} base providers overridden)", n),
            };
            format!(
                "Merged {} external provider(s) into: {}{}",
                providers, output, overrides
            )
        }
    }
}

/// Indent every line after the first by two spaces; blank lines stay empty
fn indent_continuation(msg: &str) -> String {
    let mut lines = msg.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str("  ");
            out.push_str(line);
        }
    }
    out
}
