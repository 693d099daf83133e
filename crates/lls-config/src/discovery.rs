//! Discovery of installed providers on the shared metadata mount
//!
//! Each install step leaves one directory named after its provider ID,
//! holding the copied metadata document and the CRD config artifact.
//! Directories are processed in name order so the merge is reproducible.

use lls_core::paths::{CRD_CONFIG_FILE_NAME, METADATA_FILE_NAME};
use lls_core::{ApiPlacementError, CrdConfig, Error, ProviderEntry, ProviderMetadata, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Provider artifact directories under `metadata_dir`, sorted by name
///
/// Plain files are ignored.
pub fn provider_dirs(metadata_dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |e| Error::io("read metadata directory", metadata_dir, e);

    let mut dirs = Vec::new();
    for entry in fs::read_dir(metadata_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_type().map_err(read_err)?.is_dir() {
            dirs.push(entry.path());
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Load, validate and reconcile every provider under `metadata_dir`
///
/// Fails on the first provider whose artifacts are missing, invalid, or
/// placed under a CRD section other than the API its metadata declares.
pub fn discover_providers(metadata_dir: &Path) -> Result<Vec<ProviderEntry>> {
    let dirs = provider_dirs(metadata_dir)?;
    debug!(
        "Found {} provider directories in {}",
        dirs.len(),
        metadata_dir.display()
    );

    let providers = dirs
        .iter()
        .map(|dir| load_provider(dir))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Discovered {} external providers in {}",
        providers.len(),
        metadata_dir.display()
    );
    Ok(providers)
}

/// Reconcile one provider's metadata with its CRD config
pub fn load_provider(dir: &Path) -> Result<ProviderEntry> {
    let dir_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    read_artifacts(dir).map_err(|e| Error::for_provider(dir_name, e))
}

fn read_artifacts(dir: &Path) -> Result<ProviderEntry> {
    let metadata = ProviderMetadata::load(&dir.join(METADATA_FILE_NAME))?;
    let crd = CrdConfig::load(&dir.join(CRD_CONFIG_FILE_NAME))?;

    let placed_in = crd.config_api();
    if metadata.spec.api != placed_in {
        return Err(ApiPlacementError {
            provider_id: crd.provider_id,
            image: crd.image,
            declared_api: metadata.spec.api,
            placed_in_api: crd.api,
        }
        .into());
    }

    debug!(
        "Provider {} ({}) placed under {}",
        crd.provider_id, metadata.spec.provider_type, placed_in
    );

    Ok(ProviderEntry {
        provider_id: crd.provider_id,
        provider_type: metadata.spec.provider_type,
        module: metadata.spec.package_name,
        api: metadata.spec.api,
        config: crd.config,
        image: crd.image,
    })
}
