//! Config merge engine for external providers
//!
//! Runs inside the generation step of a pod: reads the artifacts each
//! install step left on the shared mount, checks them against their CRD
//! placement, and folds them into the base config.yaml.

pub mod discovery;
pub mod generator;
pub mod merge;

pub use discovery::{discover_providers, load_provider, provider_dirs};
pub use generator::{
    generate_config, generate_or_copy, passthrough_reason, write_atomic, GenerateOutcome,
    PassthroughReason,
};
pub use merge::{check_unique_ids, merge_external_providers};
