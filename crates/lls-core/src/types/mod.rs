//! Type definitions for external providers and the runtime configuration

mod crd_config;
mod provider_types;
mod run_config;

pub use crd_config::*;
pub use provider_types::*;
pub use run_config::*;
