//! Folding discovered providers into a base config.yaml

use lls_core::{DuplicateProviderError, MergeWarning, ProviderEntry, Result, RunYamlConfig};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Merge external provider entries into `config`, in the given order
///
/// An entry whose ID already exists under the same API replaces the base
/// entry at its position and yields a warning; any other entry is appended,
/// creating the API section when absent. Duplicate IDs among `providers`
/// are rejected before `config` is touched.
pub fn merge_external_providers(
    config: &mut RunYamlConfig,
    providers: &[ProviderEntry],
) -> Result<Vec<MergeWarning>> {
    check_unique_ids(providers)?;

    let mut warnings = Vec::new();

    for provider in providers {
        let entry = provider.to_config_entry();
        let section = config.providers.entry(provider.api.clone()).or_default();

        match section
            .iter_mut()
            .find(|existing| existing.provider_id == provider.provider_id)
        {
            Some(existing) => {
                let warning = MergeWarning {
                    provider_id: provider.provider_id.clone(),
                    api: provider.api.clone(),
                    base_type: existing.provider_type.clone(),
                    external_type: provider.provider_type.clone(),
                };
                warn!("{}", warning);
                *existing = entry;
                warnings.push(warning);
            }
            None => {
                debug!("Adding provider {} to {}", provider.provider_id, provider.api);
                section.push(entry);
            }
        }
    }

    Ok(warnings)
}

/// Reject two entries sharing a provider ID, whatever their API
pub fn check_unique_ids(providers: &[ProviderEntry]) -> Result<()> {
    let mut seen: HashMap<&str, &ProviderEntry> = HashMap::with_capacity(providers.len());

    for provider in providers {
        if let Some(first) = seen.insert(provider.provider_id.as_str(), provider) {
            return Err(DuplicateProviderError {
                provider_id: provider.provider_id.clone(),
                first_api: first.api.clone(),
                first_image: first.image.clone(),
                second_api: provider.api.clone(),
                second_image: provider.image.clone(),
            }
            .into());
        }
    }

    Ok(())
}
