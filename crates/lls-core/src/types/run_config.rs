//! The runtime configuration document (`config.yaml`) and merge-ready entries

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The config.yaml passed to `llama stack run`
///
/// Top-level fields not modelled here are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunYamlConfig {
    #[serde(default)]
    pub version: u32,

    #[serde(
        default,
        rename = "distro_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apis: Option<Vec<String>>,

    /// Provider entries keyed by config-facing API name
    #[serde(default)]
    pub providers: BTreeMap<String, Vec<ProviderConfigEntry>>,

    #[serde(flatten)]
    pub extra: serde_yaml_ng::Mapping,
}

/// One entry of a `providers.<api>` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfigEntry {
    pub provider_id: String,

    pub provider_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_yaml_ng::Value>,
}

impl RunYamlConfig {
    /// Read and parse a config.yaml file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading run config: {}", path.display());

        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read config file", path, e))?;
        serde_yaml_ng::from_str(&content).map_err(|e| Error::parse_file(path, e))
    }

    /// Parse config.yaml content
    pub fn parse(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Provider entries for one config-facing API name
    pub fn providers_for(&self, api: &str) -> &[ProviderConfigEntry] {
        self.providers.get(api).map(Vec::as_slice).unwrap_or_default()
    }
}

/// An external provider reconciled from its metadata and CRD config
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEntry {
    pub provider_id: String,
    pub provider_type: String,
    /// Python module, from the metadata `packageName`
    pub module: String,
    /// Config-facing API name
    pub api: String,
    pub config: Option<serde_yaml_ng::Value>,
    /// Image the provider was installed from, when recorded
    pub image: Option<String>,
}

impl ProviderEntry {
    /// The config.yaml entry for this provider
    pub fn to_config_entry(&self) -> ProviderConfigEntry {
        ProviderConfigEntry {
            provider_id: self.provider_id.clone(),
            provider_type: self.provider_type.clone(),
            module: Some(self.module.clone()),
            config: self.config.clone(),
        }
    }
}

/// An external provider replaced an entry of the base configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeWarning {
    pub provider_id: String,
    pub api: String,
    pub base_type: String,
    pub external_type: String,
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "External provider '{}' overrides base provider in API '{}'\n  \
             Base type: {}\n  \
             External type: {}",
            self.provider_id, self.api, self.base_type, self.external_type
        )
    }
}
