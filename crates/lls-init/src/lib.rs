//! Init-step planning for external providers
//!
//! This crate handles:
//! - Install script synthesis (one shell procedure per provider)
//! - Base config extraction script
//! - Ordering provider installs and config steps into a deterministic plan
//! - Shared volume and mount descriptions for the pod-spec builder

pub mod planner;
pub mod steps;
pub mod synthesizer;
pub mod templates;
pub mod volumes;

pub use planner::{has_external_providers, plan_init_steps, InitStepPlanner, PlanOptions};
pub use steps::{ExtractConfigStep, GenerateConfigStep, InitStep, InstallStep};
pub use synthesizer::InstallScriptSynthesizer;
pub use volumes::{Volume, VolumeMount, VolumeSource};
