//! Provider metadata validation
//!
//! Checks run in a fixed order and the first failure wins, so a document
//! with several problems always reports the same one:
//! 1. `apiVersion` and `kind`
//! 2. `metadata.name`, `metadata.version`, `metadata.vendor`
//! 3. `spec.packageName`
//! 4. `spec.providerType`
//! 5. `spec.api`
//! 6. `spec.wheelPath`

use crate::api::{is_valid_api, valid_api_names};
use crate::error::ValidationError;
use crate::metadata::ProviderMetadata;
use crate::paths::{METADATA_API_VERSION, METADATA_KIND};
use regex::Regex;
use std::sync::LazyLock;

/// Provider type format: `(remote|inline)::name`
static PROVIDER_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(remote|inline)::[a-z0-9-]+$").expect("provider type regex is valid")
});

/// A bare Python identifier
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier regex is valid")
});

type Check = std::result::Result<(), ValidationError>;

/// Validate provider metadata structure and values
pub fn validate_metadata(m: &ProviderMetadata) -> Check {
    validate_header(m)?;
    validate_package_info(m)?;
    validate_package_name(&m.spec.package_name)?;
    validate_provider_type(&m.spec.provider_type)?;
    validate_api(&m.spec.api)?;

    if m.spec.wheel_path.is_empty() {
        return Err(ValidationError::required("spec.wheelPath"));
    }

    Ok(())
}

fn validate_header(m: &ProviderMetadata) -> Check {
    if m.api_version != METADATA_API_VERSION {
        return Err(ValidationError::new(
            "apiVersion",
            format!("expected {}, got {}", METADATA_API_VERSION, m.api_version),
        ));
    }

    if m.kind != METADATA_KIND {
        return Err(ValidationError::new(
            "kind",
            format!("expected {}, got {}", METADATA_KIND, m.kind),
        ));
    }

    Ok(())
}

fn validate_package_info(m: &ProviderMetadata) -> Check {
    let required = [
        ("metadata.name", &m.metadata.name),
        ("metadata.version", &m.metadata.version),
        ("metadata.vendor", &m.metadata.vendor),
    ];

    for (field, value) in required {
        if value.is_empty() {
            return Err(ValidationError::required(field));
        }
    }

    Ok(())
}

fn validate_package_name(package_name: &str) -> Check {
    if package_name.is_empty() {
        return Err(ValidationError::required("spec.packageName"));
    }

    validate_module_name(package_name)
        .map_err(|message| ValidationError::new("spec.packageName", message))
}

fn validate_provider_type(provider_type: &str) -> Check {
    if provider_type.is_empty() {
        return Err(ValidationError::required("spec.providerType"));
    }

    if !PROVIDER_TYPE_RE.is_match(provider_type) {
        return Err(ValidationError::new(
            "spec.providerType",
            format!(
                "must match pattern (remote|inline)::[a-z0-9-]+, got {}",
                provider_type
            ),
        ));
    }

    Ok(())
}

fn validate_api(api: &str) -> Check {
    if api.is_empty() {
        return Err(ValidationError::required("spec.api"));
    }

    if !is_valid_api(api) {
        return Err(ValidationError::new(
            "spec.api",
            format!(
                "must be one of [{}], got {}",
                valid_api_names().join(", "),
                api
            ),
        ));
    }

    Ok(())
}

/// Check that `name` is a dotted path of Python identifiers
fn validate_module_name(name: &str) -> std::result::Result<(), String> {
    for part in name.split('.') {
        if part.is_empty() {
            return Err(format!("module name '{}' contains an empty component", name));
        }
        if !IDENTIFIER_RE.is_match(part) {
            return Err(format!(
                "component '{}' is not a valid Python identifier",
                part
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{PackageInfo, PackageSpec};
    use test_case::test_case;

    fn valid() -> ProviderMetadata {
        ProviderMetadata {
            api_version: METADATA_API_VERSION.to_string(),
            kind: METADATA_KIND.to_string(),
            metadata: PackageInfo {
                name: "custom-guard".to_string(),
                version: "0.3.1".to_string(),
                vendor: "acme".to_string(),
                description: None,
                maintainer: None,
            },
            spec: PackageSpec {
                package_name: "acme.guard".to_string(),
                provider_type: "inline::acme-guard".to_string(),
                api: "safety".to_string(),
                wheel_path: "/lls-provider/packages/acme_guard.whl".to_string(),
                dependency_wheels: Vec::new(),
            },
        }
    }

    fn field_of(m: &ProviderMetadata) -> String {
        validate_metadata(m).unwrap_err().field
    }

    #[test]
    fn test_valid_metadata_passes() {
        assert!(validate_metadata(&valid()).is_ok());
    }

    #[test]
    fn test_wrong_api_version() {
        let mut m = valid();
        m.api_version = "llamastack.io/v2".to_string();
        let err = validate_metadata(&m).unwrap_err();
        assert_eq!(err.field, "apiVersion");
        assert_eq!(
            err.message,
            "expected llamastack.io/v1alpha1, got llamastack.io/v2"
        );
    }

    #[test]
    fn test_wrong_kind() {
        let mut m = valid();
        m.kind = "Provider".to_string();
        assert_eq!(field_of(&m), "kind");
    }

    #[test_case("name" ; "empty name")]
    #[test_case("version" ; "empty version")]
    #[test_case("vendor" ; "empty vendor")]
    fn test_required_package_info(field: &str) {
        let mut m = valid();
        match field {
            "name" => m.metadata.name.clear(),
            "version" => m.metadata.version.clear(),
            _ => m.metadata.vendor.clear(),
        }
        let err = validate_metadata(&m).unwrap_err();
        assert_eq!(err.field, format!("metadata.{field}"));
        assert_eq!(err.message, "is required");
    }

    #[test_case("acme" ; "single component")]
    #[test_case("acme.guard.v2" ; "nested components")]
    #[test_case("_private.mod_1" ; "leading underscore")]
    fn test_valid_package_names(name: &str) {
        let mut m = valid();
        m.spec.package_name = name.to_string();
        assert!(validate_metadata(&m).is_ok());
    }

    #[test_case("acme..guard", "empty component" ; "double dot")]
    #[test_case(".acme", "empty component" ; "leading dot")]
    #[test_case("acme.1guard", "'1guard' is not a valid Python identifier" ; "digit start")]
    #[test_case("acme-corp.guard", "'acme-corp' is not a valid Python identifier" ; "hyphen")]
    fn test_invalid_package_names(name: &str, expected: &str) {
        let mut m = valid();
        m.spec.package_name = name.to_string();
        let err = validate_metadata(&m).unwrap_err();
        assert_eq!(err.field, "spec.packageName");
        assert!(err.message.contains(expected), "message: {}", err.message);
    }

    #[test_case("remote::vllm" ; "remote")]
    #[test_case("inline::meta-reference-2" ; "inline with digits")]
    fn test_valid_provider_types(provider_type: &str) {
        let mut m = valid();
        m.spec.provider_type = provider_type.to_string();
        assert!(validate_metadata(&m).is_ok());
    }

    #[test_case("vllm" ; "missing prefix")]
    #[test_case("hosted::vllm" ; "unknown prefix")]
    #[test_case("remote::VLLM" ; "uppercase")]
    #[test_case("remote::" ; "empty name")]
    #[test_case("remote::vllm_2" ; "underscore")]
    fn test_invalid_provider_types(provider_type: &str) {
        let mut m = valid();
        m.spec.provider_type = provider_type.to_string();
        let err = validate_metadata(&m).unwrap_err();
        assert_eq!(err.field, "spec.providerType");
        assert!(err.message.contains(provider_type));
    }

    #[test]
    fn test_api_must_use_config_spelling() {
        let mut m = valid();
        m.spec.api = "vectorIo".to_string();
        let err = validate_metadata(&m).unwrap_err();
        assert_eq!(err.field, "spec.api");
        assert!(err.message.contains("vector_io"));
        assert!(err.message.ends_with("got vectorIo"));

        m.spec.api = "vector_io".to_string();
        assert!(validate_metadata(&m).is_ok());
    }

    #[test]
    fn test_empty_wheel_path() {
        let mut m = valid();
        m.spec.wheel_path.clear();
        assert_eq!(field_of(&m), "spec.wheelPath");
    }

    #[test]
    fn test_metadata_fields_checked_before_spec_fields() {
        let mut m = valid();
        m.metadata.vendor.clear();
        m.spec.provider_type = "bogus".to_string();
        assert_eq!(field_of(&m), "metadata.vendor");
    }

    #[test]
    fn test_header_checked_first() {
        let mut m = valid();
        m.kind = "Other".to_string();
        m.metadata.name.clear();
        m.spec.wheel_path.clear();
        assert_eq!(field_of(&m), "kind");
    }

    #[test]
    fn test_spec_precedence() {
        let mut m = valid();
        m.spec.provider_type = "bogus".to_string();
        m.spec.api = "bogus".to_string();
        m.spec.wheel_path.clear();
        assert_eq!(field_of(&m), "spec.providerType");

        m.spec.provider_type = "remote::ok".to_string();
        assert_eq!(field_of(&m), "spec.api");
    }
}
