//! Install script synthesis
//!
//! Produces the self-contained shell procedure that runs inside a provider's
//! own image: it checks the image layout, copies the metadata, writes the
//! CRD config artifact, installs the wheels offline and appends to the
//! shared install log.

use crate::templates::{ScriptTemplates, EXTRACT_CONFIG_TEMPLATE, INSTALL_PROVIDER_TEMPLATE};
use lls_core::paths::{
    BASE_CONFIG_MOUNT_PATH, CONFIG_FILE_NAME, CRD_CONFIG_FILE_NAME, EXTERNAL_PROVIDERS_MOUNT_PATH,
    IMAGE_METADATA_PATH, IMAGE_PACKAGES_PATH, INSTALLED_PACKAGES_LOG, METADATA_DIR_PATH,
    METADATA_FILE_NAME, PYTHON_PACKAGES_PATH,
};
use lls_core::{ApiGroup, CrdConfig, ProviderRef, Result};
use serde::Serialize;

/// Locations where distribution images keep their config.yaml, newest first
pub const DISTRIBUTION_CONFIG_CANDIDATES: &[&str] =
    &["/opt/app-root/config.yaml", "/etc/llama-stack/config.yaml"];

#[derive(Serialize)]
struct InstallScriptContext<'a> {
    provider_id: &'a str,
    image: &'a str,
    crd_config: String,
    metadata_dir: &'a str,
    external_providers_mount: &'a str,
    metadata_file: &'a str,
    crd_config_file: &'a str,
    image_metadata_path: &'a str,
    image_packages_path: &'a str,
    python_packages_path: &'a str,
    install_log: String,
}

#[derive(Serialize)]
struct ExtractScriptContext<'a> {
    config_file: &'a str,
    candidates: &'a [&'a str],
    destination: String,
}

/// Renders install and extraction scripts
pub struct InstallScriptSynthesizer {
    templates: ScriptTemplates,
}

impl InstallScriptSynthesizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: ScriptTemplates::new()?,
        })
    }

    /// Install script for one provider declared under `api`
    pub fn install_script(&self, provider: &ProviderRef, api: ApiGroup) -> Result<String> {
        let context = InstallScriptContext {
            provider_id: &provider.provider_id,
            image: &provider.image,
            crd_config: CrdConfig::render(
                &provider.provider_id,
                api,
                &provider.image,
                provider.config.as_ref(),
            ),
            metadata_dir: METADATA_DIR_PATH,
            external_providers_mount: EXTERNAL_PROVIDERS_MOUNT_PATH,
            metadata_file: METADATA_FILE_NAME,
            crd_config_file: CRD_CONFIG_FILE_NAME,
            image_metadata_path: IMAGE_METADATA_PATH,
            image_packages_path: IMAGE_PACKAGES_PATH,
            python_packages_path: PYTHON_PACKAGES_PATH,
            install_log: format!("{}/{}", EXTERNAL_PROVIDERS_MOUNT_PATH, INSTALLED_PACKAGES_LOG),
        };

        self.templates.render(INSTALL_PROVIDER_TEMPLATE, &context)
    }

    /// Script copying config.yaml out of a distribution image
    pub fn extract_config_script(&self) -> Result<String> {
        let context = ExtractScriptContext {
            config_file: CONFIG_FILE_NAME,
            candidates: DISTRIBUTION_CONFIG_CANDIDATES,
            destination: format!("{}/{}", BASE_CONFIG_MOUNT_PATH, CONFIG_FILE_NAME),
        };

        self.templates.render(EXTRACT_CONFIG_TEMPLATE, &context)
    }
}
