//! The `crd-config.yaml` artifact written by each provider install step

use crate::api::{crd_to_config_api_name, ApiGroup};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Placement and configuration of one provider, as declared in the CRD
///
/// Written as a single-line JSON document so it can be embedded in a shell
/// heredoc; read back as YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrdConfig {
    #[serde(rename = "providerId")]
    pub provider_id: String,

    /// CRD-facing API section the provider was declared under
    pub api: String,

    /// Image the provider was installed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_yaml_ng::Value>,
}

impl CrdConfig {
    /// Build the artifact for a provider declared under `api`
    ///
    /// A config value that cannot be represented as a YAML document is
    /// returned as an error so the caller can fall back to [`CrdConfig::minimal_json`].
    pub fn new(
        provider_id: &str,
        api: ApiGroup,
        image: &str,
        config: Option<&serde_json::Value>,
    ) -> Result<Self> {
        let config = config.map(serde_yaml_ng::to_value).transpose()?;
        Ok(Self {
            provider_id: provider_id.to_string(),
            api: api.crd_name().to_string(),
            image: Some(image.to_string()),
            config,
        })
    }

    /// Config-facing name of the section this provider was placed under
    pub fn config_api(&self) -> &str {
        crd_to_config_api_name(&self.api)
    }

    /// Serialize to single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Minimal document carrying only the provider ID and config-facing API name
    pub fn minimal_json(provider_id: &str, api: ApiGroup) -> String {
        minimal_document(provider_id, api.config_name())
    }

    /// Single-line JSON, or the minimal document when the config cannot be
    /// expressed as JSON (e.g. a mapping with non-string keys)
    pub fn to_json_or_minimal(&self) -> String {
        match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    "Failed to serialize CRD config for provider {}, writing minimal document: {}",
                    self.provider_id, e
                );
                minimal_document(&self.provider_id, self.config_api())
            }
        }
    }

    /// Render the artifact for an install script, never failing
    ///
    /// Falls back to [`CrdConfig::minimal_json`] when the config document
    /// cannot be converted or serialized.
    pub fn render(
        provider_id: &str,
        api: ApiGroup,
        image: &str,
        config: Option<&serde_json::Value>,
    ) -> String {
        match Self::new(provider_id, api, image, config) {
            Ok(doc) => doc.to_json_or_minimal(),
            Err(e) => {
                warn!(
                    "Failed to convert CRD config for provider {}, writing minimal document: {}",
                    provider_id, e
                );
                Self::minimal_json(provider_id, api)
            }
        }
    }

    /// Load a `crd-config.yaml` file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading CRD config: {}", path.display());

        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read CRD config", path, e))?;
        serde_yaml_ng::from_str(&content).map_err(|e| Error::parse_file(path, e))
    }
}

fn minimal_document(provider_id: &str, config_api: &str) -> String {
    serde_json::json!({
        "providerId": provider_id,
        "api": config_api,
    })
    .to_string()
}
