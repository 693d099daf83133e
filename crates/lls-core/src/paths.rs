//! Well-known paths and names shared by install steps and config generation

/// Expected `apiVersion` of provider metadata documents
pub const METADATA_API_VERSION: &str = "llamastack.io/v1alpha1";

/// Expected `kind` of provider metadata documents
pub const METADATA_KIND: &str = "ProviderPackage";

/// Metadata file location inside a provider image
pub const IMAGE_METADATA_PATH: &str = "/lls-provider/lls-provider-spec.yaml";

/// Wheel package directory inside a provider image
pub const IMAGE_PACKAGES_PATH: &str = "/lls-provider/packages";

/// File name of the copied metadata document in a provider's artifact directory
pub const METADATA_FILE_NAME: &str = "lls-provider-spec.yaml";

/// File name of the CRD config document in a provider's artifact directory
pub const CRD_CONFIG_FILE_NAME: &str = "crd-config.yaml";

/// Shared install log, relative to the external providers mount
pub const INSTALLED_PACKAGES_LOG: &str = "installed-packages.txt";

/// Mount path of the shared external providers volume
pub const EXTERNAL_PROVIDERS_MOUNT_PATH: &str = "/opt/llama-stack/external-providers";

/// Destination for installed Python packages
pub const PYTHON_PACKAGES_PATH: &str = "/opt/llama-stack/external-providers/python-packages";

/// Directory holding one artifact subdirectory per installed provider
pub const METADATA_DIR_PATH: &str = "/opt/llama-stack/external-providers/metadata";

/// Mount path of the base configuration
pub const BASE_CONFIG_MOUNT_PATH: &str = "/opt/llama-stack/base-config";

/// Mount path of the generated configuration
pub const FINAL_CONFIG_MOUNT_PATH: &str = "/opt/llama-stack/config";

/// File name of the runtime configuration document
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default base configuration path consumed by the generation step
pub const DEFAULT_BASE_CONFIG: &str = "/opt/llama-stack/base-config/config.yaml";

/// Default output path written by the generation step
pub const DEFAULT_OUTPUT_CONFIG: &str = "/opt/llama-stack/config/config.yaml";
