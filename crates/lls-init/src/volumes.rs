//! Shared volumes used by the init steps and the main container

use lls_core::paths::{
    BASE_CONFIG_MOUNT_PATH, EXTERNAL_PROVIDERS_MOUNT_PATH, FINAL_CONFIG_MOUNT_PATH,
    PYTHON_PACKAGES_PATH,
};
use serde::Serialize;

/// Scratch volume shared by all install steps
pub const EXTERNAL_PROVIDERS_VOLUME: &str = "external-providers";

/// Volume holding the base config.yaml
pub const BASE_CONFIG_VOLUME: &str = "base-config";

/// Volume receiving the generated config.yaml
pub const FINAL_CONFIG_VOLUME: &str = "final-config";

/// Default size limit of the external providers volume
pub const DEFAULT_VOLUME_SIZE_LIMIT: &str = "2Gi";

/// Environment variable the main container imports providers through
pub const PYTHON_PATH_VAR: &str = "PYTHONPATH";

/// A volume mounted into one step or container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub read_only: bool,
}

impl VolumeMount {
    pub fn read_write(name: &str, mount_path: &str) -> Self {
        Self {
            name: name.to_string(),
            mount_path: mount_path.to_string(),
            read_only: false,
        }
    }

    pub fn read_only(name: &str, mount_path: &str) -> Self {
        Self {
            read_only: true,
            ..Self::read_write(name, mount_path)
        }
    }
}

/// Where a volume's content comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeSource {
    EmptyDir {
        #[serde(skip_serializing_if = "Option::is_none")]
        size_limit: Option<String>,
    },
    ConfigMap {
        name: String,
    },
}

/// A pod-level volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    pub name: String,
    #[serde(flatten)]
    pub source: VolumeSource,
}

/// The shared external providers volume
pub fn external_providers_volume(size_limit: Option<&str>) -> Volume {
    Volume {
        name: EXTERNAL_PROVIDERS_VOLUME.to_string(),
        source: VolumeSource::EmptyDir {
            size_limit: Some(size_limit.unwrap_or(DEFAULT_VOLUME_SIZE_LIMIT).to_string()),
        },
    }
}

/// The base config volume: the user's ConfigMap when given, scratch space for extraction otherwise
pub fn base_config_volume(config_map: Option<&str>) -> Volume {
    let source = match config_map {
        Some(name) => VolumeSource::ConfigMap {
            name: name.to_string(),
        },
        None => VolumeSource::EmptyDir { size_limit: None },
    };

    Volume {
        name: BASE_CONFIG_VOLUME.to_string(),
        source,
    }
}

pub fn final_config_volume() -> Volume {
    Volume {
        name: FINAL_CONFIG_VOLUME.to_string(),
        source: VolumeSource::EmptyDir { size_limit: None },
    }
}

/// All volumes a pod with external providers needs
pub fn pod_volumes(config_map: Option<&str>, size_limit: Option<&str>) -> Vec<Volume> {
    vec![
        external_providers_volume(size_limit),
        base_config_volume(config_map),
        final_config_volume(),
    ]
}

/// Mounts for the main server container
pub fn main_container_mounts() -> Vec<VolumeMount> {
    vec![
        VolumeMount::read_only(EXTERNAL_PROVIDERS_VOLUME, EXTERNAL_PROVIDERS_MOUNT_PATH),
        VolumeMount::read_only(FINAL_CONFIG_VOLUME, FINAL_CONFIG_MOUNT_PATH),
    ]
}

pub(crate) fn base_config_mount(read_only: bool) -> VolumeMount {
    if read_only {
        VolumeMount::read_only(BASE_CONFIG_VOLUME, BASE_CONFIG_MOUNT_PATH)
    } else {
        VolumeMount::read_write(BASE_CONFIG_VOLUME, BASE_CONFIG_MOUNT_PATH)
    }
}

/// PYTHONPATH for the main container, with installed provider packages first
pub fn python_path(existing: Option<&str>) -> String {
    match existing {
        Some(current) if !current.is_empty() => format!("{}:{}", PYTHON_PACKAGES_PATH, current),
        _ => PYTHON_PACKAGES_PATH.to_string(),
    }
}
