//! Config generation orchestration
//!
//! Loads the base config.yaml, discovers installed providers, merges them
//! and writes the result. Each stage wraps its failure with the stage name.
//! The output file is replaced atomically, and only after every earlier
//! stage succeeded.

use crate::discovery::{discover_providers, provider_dirs};
use crate::merge::merge_external_providers;
use lls_core::{Error, MergeWarning, Result, RunYamlConfig, Stage};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Why no merge was needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    MissingMetadataDir,
    EmptyMetadataDir,
}

impl fmt::Display for PassthroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassthroughReason::MissingMetadataDir => {
                write!(f, "metadata directory does not exist")
            }
            PassthroughReason::EmptyMetadataDir => write!(f, "metadata directory is empty"),
        }
    }
}

/// Result of a successful generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// No providers were installed; the base config was copied unchanged
    Passthrough(PassthroughReason),
    /// Providers were merged into the base config
    Merged {
        providers: usize,
        warnings: Vec<MergeWarning>,
    },
}

impl GenerateOutcome {
    pub fn warnings(&self) -> &[MergeWarning] {
        match self {
            GenerateOutcome::Passthrough(_) => &[],
            GenerateOutcome::Merged { warnings, .. } => warnings,
        }
    }
}

/// Load, discover, merge and write
///
/// Returns the merge warnings. Nothing is written when any stage fails.
pub fn generate_config(
    base_config: &Path,
    metadata_dir: &Path,
    output: &Path,
) -> Result<Vec<MergeWarning>> {
    let (_, warnings) = merge_into_output(base_config, metadata_dir, output)?;
    Ok(warnings)
}

/// Generate the output config, copying the base config verbatim when no
/// providers are installed
pub fn generate_or_copy(
    base_config: &Path,
    metadata_dir: &Path,
    output: &Path,
) -> Result<GenerateOutcome> {
    if let Some(reason) = passthrough_reason(metadata_dir)? {
        debug!("No external providers detected ({})", reason);
        copy_config(base_config, output)?;
        return Ok(GenerateOutcome::Passthrough(reason));
    }

    let (providers, warnings) = merge_into_output(base_config, metadata_dir, output)?;
    Ok(GenerateOutcome::Merged {
        providers,
        warnings,
    })
}

fn merge_into_output(
    base_config: &Path,
    metadata_dir: &Path,
    output: &Path,
) -> Result<(usize, Vec<MergeWarning>)> {
    let mut config = RunYamlConfig::load(base_config)
        .map_err(|e| Error::in_stage(Stage::LoadBaseConfig, e))?;

    let providers = discover_providers(metadata_dir)
        .map_err(|e| Error::in_stage(Stage::DiscoverProviders, e))?;

    let warnings = merge_external_providers(&mut config, &providers)
        .map_err(|e| Error::in_stage(Stage::MergeProviders, e))?;

    config
        .to_yaml()
        .and_then(|yaml| write_atomic(output, yaml.as_bytes()))
        .map_err(|e| Error::in_stage(Stage::WriteOutput, e))?;

    debug!(
        "Merged {} external providers into {} ({} overrides)",
        providers.len(),
        output.display(),
        warnings.len()
    );
    Ok((providers.len(), warnings))
}

/// Whether generation can skip merging for `metadata_dir`
pub fn passthrough_reason(metadata_dir: &Path) -> Result<Option<PassthroughReason>> {
    match fs::metadata(metadata_dir) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(Some(PassthroughReason::MissingMetadataDir))
        }
        Err(e) => return Err(Error::io("read metadata directory", metadata_dir, e)),
        Ok(_) => {}
    }

    if provider_dirs(metadata_dir)?.is_empty() {
        Ok(Some(PassthroughReason::EmptyMetadataDir))
    } else {
        Ok(None)
    }
}

fn copy_config(base_config: &Path, output: &Path) -> Result<()> {
    let content = fs::read(base_config)
        .map_err(|e| Error::io("read config file", base_config, e))
        .map_err(|e| Error::in_stage(Stage::LoadBaseConfig, e))?;

    write_atomic(output, &content).map_err(|e| Error::in_stage(Stage::WriteOutput, e))?;
    debug!("Copied {} to {}", base_config.display(), output.display());
    Ok(())
}

/// Write `content` to a temporary file next to `path`, then rename it into place
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io("create temporary file in", dir, e))?;
    tmp.write_all(content)
        .map_err(|e| Error::io("write temporary file for", path, e))?;
    tmp.persist(path)
        .map_err(|e| Error::io("replace", path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_passthrough_reason() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            passthrough_reason(&tmp.path().join("absent")).unwrap(),
            Some(PassthroughReason::MissingMetadataDir)
        );

        fs::write(tmp.path().join("stray.txt"), "x").unwrap();
        assert_eq!(
            passthrough_reason(tmp.path()).unwrap(),
            Some(PassthroughReason::EmptyMetadataDir)
        );

        fs::create_dir(tmp.path().join("provider")).unwrap();
        assert_eq!(passthrough_reason(tmp.path()).unwrap(), None);
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("config.yaml");

        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(err.to_string().starts_with("failed to create temporary file in"));
        assert!(!path.exists());
    }

    #[test]
    fn test_passthrough_reason_display() {
        assert_eq!(
            PassthroughReason::MissingMetadataDir.to_string(),
            "metadata directory does not exist"
        );
        assert_eq!(
            PassthroughReason::EmptyMetadataDir.to_string(),
            "metadata directory is empty"
        );
    }
}
