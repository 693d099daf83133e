//! Shared fixtures for config generation tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use lls_core::paths::{CRD_CONFIG_FILE_NAME, METADATA_FILE_NAME};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BASE_CONFIG: &str = r#"version: 2
distro_name: starter
apis:
  - inference
  - safety
providers:
  inference:
    - provider_id: builtin
      provider_type: remote::ollama
      config:
        url: http://localhost:11434
  safety:
    - provider_id: llama-guard
      provider_type: inline::llama-guard
      config: {}
server:
  port: 8321
"#;

/// One provider's artifacts as an install step would leave them
#[derive(Debug, Clone)]
pub struct ProviderFixture {
    pub provider_id: String,
    /// Config-facing API declared in the metadata
    pub declared_api: String,
    /// CRD-facing API written to the CRD config
    pub placed_in: String,
    pub provider_type: String,
    pub package_name: String,
    pub image: Option<String>,
    pub config: Option<Value>,
}

impl ProviderFixture {
    pub fn new(provider_id: &str, api: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            declared_api: api.to_string(),
            placed_in: lls_core::config_to_crd_api_name(api).to_string(),
            provider_type: format!("remote::{}", provider_id),
            package_name: format!("org.{}", provider_id.replace('-', "_")),
            image: Some(format!("registry.example.com/{}:v1", provider_id)),
            config: None,
        }
    }

    pub fn placed_in(mut self, crd_api: &str) -> Self {
        self.placed_in = crd_api.to_string();
        self
    }

    pub fn provider_type(mut self, provider_type: &str) -> Self {
        self.provider_type = provider_type.to_string();
        self
    }

    pub fn package_name(mut self, package_name: &str) -> Self {
        self.package_name = package_name.to_string();
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }

    fn metadata_yaml(&self) -> String {
        format!(
            r#"apiVersion: llamastack.io/v1alpha1
kind: ProviderPackage
metadata:
  name: {id}
  version: 1.0.0
  vendor: example-org
spec:
  packageName: {package}
  providerType: {provider_type}
  api: {api}
  wheelPath: /lls-provider/packages/{id}-1.0.0-py3-none-any.whl
"#,
            id = self.provider_id,
            package = self.package_name,
            provider_type = self.provider_type,
            api = self.declared_api,
        )
    }

    fn crd_config_json(&self) -> String {
        let mut doc = json!({
            "providerId": self.provider_id,
            "api": self.placed_in,
        });
        if let Some(image) = &self.image {
            doc["image"] = json!(image);
        }
        if let Some(config) = &self.config {
            doc["config"] = config.clone();
        }
        doc.to_string()
    }
}

/// Temporary pod filesystem: base config, metadata mount and output directory
pub struct GenerateFixture {
    temp_dir: TempDir,
}

impl GenerateFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        fs::create_dir_all(temp_dir.path().join("metadata"))?;
        fs::create_dir_all(temp_dir.path().join("config"))?;
        fs::write(temp_dir.path().join("base-config.yaml"), BASE_CONFIG)?;
        Ok(Self { temp_dir })
    }

    pub fn base_config(&self) -> PathBuf {
        self.temp_dir.path().join("base-config.yaml")
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.temp_dir.path().join("metadata")
    }

    pub fn output(&self) -> PathBuf {
        self.temp_dir.path().join("config").join("config.yaml")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_base_config(&self, content: &str) -> Result<()> {
        fs::write(self.base_config(), content).context("Failed to write base config")
    }

    /// Write a provider's artifact directory, named by its provider ID
    pub fn install(&self, provider: &ProviderFixture) -> Result<PathBuf> {
        self.install_as(&provider.provider_id, provider)
    }

    /// Write a provider's artifacts under an arbitrary directory name
    pub fn install_as(&self, dir_name: &str, provider: &ProviderFixture) -> Result<PathBuf> {
        let dir = self.metadata_dir().join(dir_name);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(METADATA_FILE_NAME), provider.metadata_yaml())?;
        fs::write(dir.join(CRD_CONFIG_FILE_NAME), provider.crd_config_json())?;
        Ok(dir)
    }

    pub fn read_output(&self) -> Result<String> {
        fs::read_to_string(self.output()).context("Failed to read output config")
    }
}
