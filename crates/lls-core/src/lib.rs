//! # lls-core
//!
//! Core library for external provider support in LlamaStack distributions:
//! - API group tables and CRD-facing / config-facing name mapping
//! - Provider package metadata parsing and validation
//! - Type definitions for provider references, CRD config artifacts and config.yaml
//! - Error taxonomy shared by the planner and the config generator

pub mod api;
pub mod error;
pub mod metadata;
pub mod paths;
pub mod types;
pub mod validation;

pub use api::{config_to_crd_api_name, crd_to_config_api_name, ApiGroup};
pub use error::{
    ApiPlacementError, DuplicateProviderError, Error, Result, Stage, ValidationError,
};
pub use metadata::ProviderMetadata;
pub use types::{
    CrdConfig, ExternalProviders, MergeWarning, ProviderConfigEntry, ProviderEntry, ProviderRef,
    PullPolicy, RunYamlConfig,
};
pub use validation::validate_metadata;
