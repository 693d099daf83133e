//! Error types for lls-core

use crate::api::config_to_crd_api_name;
use crate::paths::METADATA_FILE_NAME;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using lls-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Image label used when an artifact does not record its source image
pub const UNKNOWN_IMAGE: &str = "unknown";

/// A provider metadata field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `spec.providerType`)
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an "is required" error for an empty field
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

/// A provider declares one API but was placed under another CRD section
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ApiPlacementError {
    pub provider_id: String,
    /// Source image, when the install step recorded it
    pub image: Option<String>,
    /// Config-facing API declared in the provider metadata
    pub declared_api: String,
    /// CRD-facing section the provider was placed under
    pub placed_in_api: String,
}

impl fmt::Display for ApiPlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Provider API type mismatch\n\n\
             Provider '{}' (image: {})\n\
             declares api={} in {}\n\
             but is placed under externalProviders.{}\n\n\
             Resolution: Move the provider to externalProviders.{} section in the LLSD spec.",
            self.provider_id,
            self.image.as_deref().unwrap_or(UNKNOWN_IMAGE),
            self.declared_api,
            METADATA_FILE_NAME,
            self.placed_in_api,
            config_to_crd_api_name(&self.declared_api),
        )
    }
}

/// Two external providers declare the same provider ID
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct DuplicateProviderError {
    pub provider_id: String,
    /// API and image of the first declaration
    pub first_api: String,
    pub first_image: Option<String>,
    /// API and image of the conflicting declaration
    pub second_api: String,
    pub second_image: Option<String>,
}

impl fmt::Display for DuplicateProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duplicate provider ID detected in external providers\n\n\
             Provider ID '{}' is declared by multiple provider images:\n  \
             - {} (api: {})\n  \
             - {} (api: {})\n\n\
             Resolution: Each provider must have a unique providerId. \
             Update the CRD to use distinct IDs.",
            self.provider_id,
            self.first_image.as_deref().unwrap_or(UNKNOWN_IMAGE),
            self.first_api,
            self.second_image.as_deref().unwrap_or(UNKNOWN_IMAGE),
            self.second_api,
        )
    }
}

/// Config generation stage, used to wrap errors with the step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadBaseConfig,
    DiscoverProviders,
    MergeProviders,
    WriteOutput,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::LoadBaseConfig => write!(f, "load base config"),
            Stage::DiscoverProviders => write!(f, "generate provider entries"),
            Stage::MergeProviders => write!(f, "merge providers"),
            Stage::WriteOutput => write!(f, "write output config"),
        }
    }
}

/// Core error types
#[derive(Error, Debug)]
pub enum Error {
    /// Provider metadata failed validation
    #[error("invalid provider metadata: {0}")]
    Validation(#[from] ValidationError),

    /// Provider placed in the wrong CRD section
    #[error("{0}")]
    ApiPlacement(#[from] ApiPlacementError),

    /// Provider ID declared more than once
    #[error("{0}")]
    DuplicateProvider(#[from] DuplicateProviderError),

    /// Filesystem operation failed
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML document at a known path could not be parsed
    #[error("failed to parse {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Failure while processing one provider's artifacts
    #[error("provider {provider_id}: {source}")]
    Provider {
        provider_id: String,
        #[source]
        source: Box<Error>,
    },

    /// Failure of one config generation stage
    #[error("failed to {stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an IO error naming the action and path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create a parse error naming the file
    pub fn parse_file(path: impl Into<PathBuf>, source: serde_yaml_ng::Error) -> Self {
        Self::ParseFile {
            path: path.into(),
            source,
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Wrap an error with the provider it belongs to
    pub fn for_provider(provider_id: impl Into<String>, source: Error) -> Self {
        Self::Provider {
            provider_id: provider_id.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error with the generation stage that produced it
    pub fn in_stage(stage: Stage, source: Error) -> Self {
        Self::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// The innermost error, with provider and stage wrappers removed
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Provider { source, .. } | Error::Stage { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The outermost generation stage, if the error was wrapped with one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
