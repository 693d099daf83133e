//! API groups and their CRD-facing / config-facing names
//!
//! The CRD spells API groups in camelCase (`vectorIo`, `toolRuntime`) while
//! config.yaml uses snake_case (`vector_io`, `tool_runtime`). Four groups
//! differ between the two spellings; the rest map to themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability category a provider can belong to
///
/// Variant order is the canonical CRD order used when planning install steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiGroup {
    Inference,
    Safety,
    Agents,
    VectorIo,
    DatasetIo,
    Scoring,
    Eval,
    ToolRuntime,
    PostTraining,
}

impl ApiGroup {
    /// All API groups in canonical order
    pub const ALL: [ApiGroup; 9] = [
        ApiGroup::Inference,
        ApiGroup::Safety,
        ApiGroup::Agents,
        ApiGroup::VectorIo,
        ApiGroup::DatasetIo,
        ApiGroup::Scoring,
        ApiGroup::Eval,
        ApiGroup::ToolRuntime,
        ApiGroup::PostTraining,
    ];

    /// Name used in the CRD `externalProviders` block
    pub fn crd_name(self) -> &'static str {
        match self {
            ApiGroup::Inference => "inference",
            ApiGroup::Safety => "safety",
            ApiGroup::Agents => "agents",
            ApiGroup::VectorIo => "vectorIo",
            ApiGroup::DatasetIo => "datasetIo",
            ApiGroup::Scoring => "scoring",
            ApiGroup::Eval => "eval",
            ApiGroup::ToolRuntime => "toolRuntime",
            ApiGroup::PostTraining => "postTraining",
        }
    }

    /// Name used in config.yaml and in provider metadata
    pub fn config_name(self) -> &'static str {
        match self {
            ApiGroup::VectorIo => "vector_io",
            ApiGroup::DatasetIo => "datasetio",
            ApiGroup::ToolRuntime => "tool_runtime",
            ApiGroup::PostTraining => "post_training",
            other => other.crd_name(),
        }
    }

    pub fn from_crd_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|api| api.crd_name() == name)
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|api| api.config_name() == name)
    }
}

impl fmt::Display for ApiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.crd_name())
    }
}

/// Whether `name` is a valid config-facing API name
pub fn is_valid_api(name: &str) -> bool {
    ApiGroup::from_config_name(name).is_some()
}

/// Config-facing API names in canonical order
pub fn valid_api_names() -> Vec<&'static str> {
    ApiGroup::ALL.iter().map(|api| api.config_name()).collect()
}

/// Convert a CRD section name to its config.yaml name; unknown names pass through
pub fn crd_to_config_api_name(crd_name: &str) -> &str {
    match ApiGroup::from_crd_name(crd_name) {
        Some(api) => api.config_name(),
        None => crd_name,
    }
}

/// Convert a config.yaml API name to its CRD section name; unknown names pass through
pub fn config_to_crd_api_name(config_name: &str) -> &str {
    match ApiGroup::from_config_name(config_name) {
        Some(api) => api.crd_name(),
        None => config_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differing_names_map_both_ways() {
        let pairs = [
            ("vectorIo", "vector_io"),
            ("datasetIo", "datasetio"),
            ("toolRuntime", "tool_runtime"),
            ("postTraining", "post_training"),
        ];
        for (crd, config) in pairs {
            assert_eq!(crd_to_config_api_name(crd), config);
            assert_eq!(config_to_crd_api_name(config), crd);
        }
    }

    #[test]
    fn test_identity_mapped_groups() {
        for name in ["inference", "safety", "agents", "scoring", "eval"] {
            assert_eq!(crd_to_config_api_name(name), name);
            assert_eq!(config_to_crd_api_name(name), name);
        }
    }

    #[test]
    fn test_mapping_is_invertible_over_all_groups() {
        for api in ApiGroup::ALL {
            assert_eq!(
                config_to_crd_api_name(crd_to_config_api_name(api.crd_name())),
                api.crd_name()
            );
        }
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(crd_to_config_api_name("telemetry"), "telemetry");
        assert_eq!(config_to_crd_api_name("files"), "files");
    }

    #[test]
    fn test_valid_api_names_use_config_spelling() {
        assert!(is_valid_api("vector_io"));
        assert!(is_valid_api("datasetio"));
        assert!(!is_valid_api("vectorIo"));
        assert!(!is_valid_api("telemetry"));
        assert_eq!(valid_api_names().len(), 9);
        assert_eq!(valid_api_names()[0], "inference");
    }

    #[test]
    fn test_serde_uses_crd_names() {
        let json = serde_json::to_string(&ApiGroup::ToolRuntime).unwrap();
        assert_eq!(json, "\"toolRuntime\"");
        let api: ApiGroup = serde_json::from_str("\"datasetIo\"").unwrap();
        assert_eq!(api, ApiGroup::DatasetIo);
    }
}
