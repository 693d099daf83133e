//! Provider package metadata (`lls-provider-spec.yaml`)
//!
//! Every external provider image ships this document. It is authored by the
//! provider image and only read here, never modified.

use crate::error::{Error, Result};
use crate::validation::validate_metadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// The `lls-provider-spec.yaml` document
///
/// Required string fields default to empty so that a missing field is
/// reported by the validator with its field name, not as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    #[serde(default, rename = "apiVersion")]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: PackageInfo,

    #[serde(default)]
    pub spec: PackageSpec,
}

/// Descriptive metadata about the provider package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package identifier
    #[serde(default)]
    pub name: String,

    /// Package version
    #[serde(default)]
    pub version: String,

    /// Organization identifier
    #[serde(default)]
    pub vendor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
}

/// Technical details of the provider package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Python module path imported by the server (e.g. `my_org.custom_vllm`)
    #[serde(default, rename = "packageName")]
    pub package_name: String,

    /// Provider type, e.g. `remote::custom-vllm`
    #[serde(default, rename = "providerType")]
    pub provider_type: String,

    /// Config-facing API name, e.g. `inference` or `vector_io`
    #[serde(default)]
    pub api: String,

    /// Path to the main wheel file
    #[serde(default, rename = "wheelPath")]
    pub wheel_path: String,

    #[serde(
        default,
        rename = "dependencyWheels",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependency_wheels: Vec<String>,
}

impl ProviderMetadata {
    /// Read, parse and validate a metadata file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading provider metadata: {}", path.display());

        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read metadata file", path, e))?;
        let metadata: ProviderMetadata =
            serde_yaml_ng::from_str(&content).map_err(|e| Error::parse_file(path, e))?;

        metadata.validate()?;
        Ok(metadata)
    }

    /// Parse and validate metadata from YAML content
    pub fn parse(yaml: &str) -> Result<Self> {
        let metadata: ProviderMetadata = serde_yaml_ng::from_str(yaml)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Validate this document; see [`validate_metadata`]
    pub fn validate(&self) -> Result<()> {
        validate_metadata(self)?;
        Ok(())
    }
}
