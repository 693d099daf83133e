//! Init-step descriptions
//!
//! Steps are pure data. The pod-spec builder turns each one into an init
//! container; they run strictly in plan order and any failure aborts the
//! rest of the plan.

use crate::volumes::{
    base_config_mount, VolumeMount, EXTERNAL_PROVIDERS_VOLUME, FINAL_CONFIG_VOLUME,
};
use lls_core::paths::{EXTERNAL_PROVIDERS_MOUNT_PATH, FINAL_CONFIG_MOUNT_PATH};
use lls_core::{ApiGroup, PullPolicy};
use serde::Serialize;

/// Prefix of provider install step names
pub const INSTALL_STEP_PREFIX: &str = "install-provider-";

/// Name of the base config extraction step
pub const EXTRACT_CONFIG_STEP_NAME: &str = "extract-distribution-config";

/// Name of the config generation step
pub const GENERATE_CONFIG_STEP_NAME: &str = "generate-config";

/// Path of the generation binary inside the operator image
pub const GENERATE_CONFIG_BINARY: &str = "/generate-config";

/// Install one provider from its own image
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallStep {
    pub provider_id: String,
    /// CRD section the provider was declared under
    pub api: ApiGroup,
    pub image: String,
    pub pull_policy: PullPolicy,
    pub script: String,
}

/// Copy config.yaml out of the distribution image
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfigStep {
    pub image: String,
    pub script: String,
}

/// Merge installed providers into the final config.yaml
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfigStep {
    pub image: String,
    pub metadata_dir: String,
    pub base_config: String,
    pub output: String,
}

/// One unit of sequential pod-startup work
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InitStep {
    Install(InstallStep),
    ExtractConfig(ExtractConfigStep),
    GenerateConfig(GenerateConfigStep),
}

impl InitStep {
    /// Container name for this step
    pub fn name(&self) -> String {
        match self {
            InitStep::Install(s) => format!("{}{}", INSTALL_STEP_PREFIX, s.provider_id),
            InitStep::ExtractConfig(_) => EXTRACT_CONFIG_STEP_NAME.to_string(),
            InitStep::GenerateConfig(_) => GENERATE_CONFIG_STEP_NAME.to_string(),
        }
    }

    pub fn image(&self) -> &str {
        match self {
            InitStep::Install(s) => &s.image,
            InitStep::ExtractConfig(s) => &s.image,
            InitStep::GenerateConfig(s) => &s.image,
        }
    }

    /// Only install steps take a user-chosen policy
    pub fn pull_policy(&self) -> PullPolicy {
        match self {
            InitStep::Install(s) => s.pull_policy,
            _ => PullPolicy::IfNotPresent,
        }
    }

    /// Container command
    pub fn command(&self) -> Vec<String> {
        match self {
            InitStep::Install(InstallStep { script, .. })
            | InitStep::ExtractConfig(ExtractConfigStep { script, .. }) => {
                vec!["/bin/sh".to_string(), "-c".to_string(), script.clone()]
            }
            InitStep::GenerateConfig(s) => vec![
                GENERATE_CONFIG_BINARY.to_string(),
                "--metadata-dir".to_string(),
                s.metadata_dir.clone(),
                "--base-config".to_string(),
                s.base_config.clone(),
                "--output".to_string(),
                s.output.clone(),
            ],
        }
    }

    pub fn volume_mounts(&self) -> Vec<VolumeMount> {
        match self {
            InitStep::Install(_) => vec![VolumeMount::read_write(
                EXTERNAL_PROVIDERS_VOLUME,
                EXTERNAL_PROVIDERS_MOUNT_PATH,
            )],
            InitStep::ExtractConfig(_) => vec![base_config_mount(false)],
            InitStep::GenerateConfig(_) => vec![
                VolumeMount::read_only(EXTERNAL_PROVIDERS_VOLUME, EXTERNAL_PROVIDERS_MOUNT_PATH),
                base_config_mount(true),
                VolumeMount::read_write(FINAL_CONFIG_VOLUME, FINAL_CONFIG_MOUNT_PATH),
            ],
        }
    }
}
