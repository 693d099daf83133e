//! Init-step planning
//!
//! Orders every declared provider and the auxiliary config steps into one
//! deterministic plan:
//! 1. one install step per provider, API groups in canonical order and
//!    providers in declaration order within a group
//! 2. config extraction, only when no user-supplied base config exists
//! 3. config generation, always last
//!
//! A spec with no external providers yields an empty plan. Provider IDs must
//! be unique across all API groups, since each install step writes to a
//! directory named after its provider ID.

use crate::steps::{ExtractConfigStep, GenerateConfigStep, InitStep, InstallStep};
use crate::synthesizer::InstallScriptSynthesizer;
use lls_core::paths::{DEFAULT_BASE_CONFIG, DEFAULT_OUTPUT_CONFIG, METADATA_DIR_PATH};
use lls_core::{ApiGroup, DuplicateProviderError, ExternalProviders, ProviderRef, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Inputs to planning that do not come from the provider list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Image providing the generate-config binary
    pub operator_image: String,
    /// Distribution image the base config is extracted from
    pub distribution_image: String,
    /// A user ConfigMap already supplies the base config
    pub has_user_config: bool,
}

impl PlanOptions {
    pub fn new(operator_image: impl Into<String>, distribution_image: impl Into<String>) -> Self {
        Self {
            operator_image: operator_image.into(),
            distribution_image: distribution_image.into(),
            has_user_config: false,
        }
    }

    pub fn with_user_config(mut self, has_user_config: bool) -> Self {
        self.has_user_config = has_user_config;
        self
    }
}

/// Builds init-step plans
pub struct InitStepPlanner {
    synthesizer: InstallScriptSynthesizer,
}

impl InitStepPlanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            synthesizer: InstallScriptSynthesizer::new()?,
        })
    }

    /// Plan the init steps for one pod
    pub fn plan(
        &self,
        providers: &ExternalProviders,
        options: &PlanOptions,
    ) -> Result<Vec<InitStep>> {
        if providers.is_empty() {
            debug!("No external providers declared, nothing to plan");
            return Ok(Vec::new());
        }

        check_unique_ids(providers)?;

        let mut steps = Vec::with_capacity(providers.len() + 2);

        for (api, provider) in providers.iter() {
            debug!(
                "Planning install step for provider {} ({})",
                provider.provider_id, api
            );
            steps.push(InitStep::Install(InstallStep {
                provider_id: provider.provider_id.clone(),
                api,
                image: provider.image.clone(),
                pull_policy: provider.pull_policy,
                script: self.synthesizer.install_script(provider, api)?,
            }));
        }

        if !options.has_user_config {
            steps.push(InitStep::ExtractConfig(ExtractConfigStep {
                image: options.distribution_image.clone(),
                script: self.synthesizer.extract_config_script()?,
            }));
        }

        steps.push(InitStep::GenerateConfig(GenerateConfigStep {
            image: options.operator_image.clone(),
            metadata_dir: METADATA_DIR_PATH.to_string(),
            base_config: DEFAULT_BASE_CONFIG.to_string(),
            output: DEFAULT_OUTPUT_CONFIG.to_string(),
        }));

        info!(
            "Planned {} init steps for {} external providers",
            steps.len(),
            providers.len()
        );
        Ok(steps)
    }
}

/// Plan init steps with a freshly built planner
pub fn plan_init_steps(
    providers: &ExternalProviders,
    options: &PlanOptions,
) -> Result<Vec<InitStep>> {
    InitStepPlanner::new()?.plan(providers, options)
}

/// Reject a provider ID declared more than once, in the same or different API groups
pub fn check_unique_ids(providers: &ExternalProviders) -> Result<()> {
    let mut seen: HashMap<&str, (ApiGroup, &ProviderRef)> =
        HashMap::with_capacity(providers.len());

    for (api, provider) in providers.iter() {
        let previous = seen.insert(provider.provider_id.as_str(), (api, provider));
        if let Some((first_api, first)) = previous {
            return Err(DuplicateProviderError {
                provider_id: provider.provider_id.clone(),
                first_api: first_api.crd_name().to_string(),
                first_image: Some(first.image.clone()),
                second_api: api.crd_name().to_string(),
                second_image: Some(provider.image.clone()),
            }
            .into());
        }
    }

    Ok(())
}

/// Whether any external provider is declared
pub fn has_external_providers(providers: Option<&ExternalProviders>) -> bool {
    providers.is_some_and(|p| !p.is_empty())
}
