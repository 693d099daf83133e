//! External provider references as declared in the distribution spec

use crate::api::ApiGroup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image pull policy for a provider install step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullPolicy {
    Always,
    #[default]
    IfNotPresent,
    Never,
}

impl fmt::Display for PullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullPolicy::Always => write!(f, "Always"),
            PullPolicy::IfNotPresent => write!(f, "IfNotPresent"),
            PullPolicy::Never => write!(f, "Never"),
        }
    }
}

/// One external provider declared under an API group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRef {
    /// Unique identifier within the API group
    #[serde(rename = "providerId")]
    pub provider_id: String,

    /// Container image holding the provider package
    pub image: String,

    #[serde(default, rename = "imagePullPolicy")]
    pub pull_policy: PullPolicy,

    /// Provider configuration, passed through to config.yaml untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ProviderRef {
    pub fn new(provider_id: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            image: image.into(),
            pull_policy: PullPolicy::default(),
            config: None,
        }
    }

    pub fn with_pull_policy(mut self, pull_policy: PullPolicy) -> Self {
        self.pull_policy = pull_policy;
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// The `externalProviders` block of a distribution spec, grouped by API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProviders {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inference: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vector_io: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dataset_io: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scoring: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eval: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_runtime: Vec<ProviderRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_training: Vec<ProviderRef>,
}

impl ExternalProviders {
    /// Providers declared under one API group, in declaration order
    pub fn for_api(&self, api: ApiGroup) -> &[ProviderRef] {
        match api {
            ApiGroup::Inference => &self.inference,
            ApiGroup::Safety => &self.safety,
            ApiGroup::Agents => &self.agents,
            ApiGroup::VectorIo => &self.vector_io,
            ApiGroup::DatasetIo => &self.dataset_io,
            ApiGroup::Scoring => &self.scoring,
            ApiGroup::Eval => &self.eval,
            ApiGroup::ToolRuntime => &self.tool_runtime,
            ApiGroup::PostTraining => &self.post_training,
        }
    }

    /// Mutable access to one API group's list
    pub fn for_api_mut(&mut self, api: ApiGroup) -> &mut Vec<ProviderRef> {
        match api {
            ApiGroup::Inference => &mut self.inference,
            ApiGroup::Safety => &mut self.safety,
            ApiGroup::Agents => &mut self.agents,
            ApiGroup::VectorIo => &mut self.vector_io,
            ApiGroup::DatasetIo => &mut self.dataset_io,
            ApiGroup::Scoring => &mut self.scoring,
            ApiGroup::Eval => &mut self.eval,
            ApiGroup::ToolRuntime => &mut self.tool_runtime,
            ApiGroup::PostTraining => &mut self.post_training,
        }
    }

    /// All providers in canonical API order, then declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ApiGroup, &ProviderRef)> + '_ {
        ApiGroup::ALL
            .into_iter()
            .flat_map(move |api| self.for_api(api).iter().map(move |p| (api, p)))
    }

    pub fn len(&self) -> usize {
        ApiGroup::ALL.iter().map(|api| self.for_api(*api).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_policy_defaults_to_if_not_present() {
        let p: ProviderRef =
            serde_json::from_str(r#"{"providerId":"a","image":"img:1"}"#).unwrap();
        assert_eq!(p.pull_policy, PullPolicy::IfNotPresent);
        assert!(p.config.is_none());
    }

    #[test]
    fn test_deserialize_crd_block() {
        let yaml = r#"
toolRuntime:
  - providerId: search
    image: quay.io/acme/search:1.0
    imagePullPolicy: Always
inference:
  - providerId: vllm-a
    image: quay.io/acme/vllm:2.0
    config:
      url: http://vllm:8000
"#;
        let ep: ExternalProviders = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(ep.len(), 2);
        assert_eq!(ep.tool_runtime[0].pull_policy, PullPolicy::Always);
        assert_eq!(
            ep.inference[0].config.as_ref().unwrap()["url"],
            "http://vllm:8000"
        );
    }

    #[test]
    fn test_iter_visits_groups_in_canonical_order() {
        let mut ep = ExternalProviders::default();
        ep.post_training.push(ProviderRef::new("pt", "img"));
        ep.vector_io.push(ProviderRef::new("vec", "img"));
        ep.inference.push(ProviderRef::new("inf-1", "img"));
        ep.inference.push(ProviderRef::new("inf-2", "img"));

        let order: Vec<(ApiGroup, &str)> = ep
            .iter()
            .map(|(api, p)| (api, p.provider_id.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (ApiGroup::Inference, "inf-1"),
                (ApiGroup::Inference, "inf-2"),
                (ApiGroup::VectorIo, "vec"),
                (ApiGroup::PostTraining, "pt"),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(ExternalProviders::default().is_empty());
    }
}
