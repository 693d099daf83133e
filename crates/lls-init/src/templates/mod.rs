//! Template rendering for init-step shell scripts
//!
//! Uses Tera templates embedded at compile time to generate the provider
//! install script and the base config extraction script.

use lls_core::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};
use tracing::debug;

/// Template name of the provider install script
pub const INSTALL_PROVIDER_TEMPLATE: &str = "install-provider.sh";

/// Template name of the base config extraction script
pub const EXTRACT_CONFIG_TEMPLATE: &str = "extract-config.sh";

/// Template registry holding all init-step script templates
pub struct ScriptTemplates {
    tera: Tera,
}

impl ScriptTemplates {
    /// Create a new registry with the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("shell_quote", shell_quote_filter);

        tera.add_raw_template(
            INSTALL_PROVIDER_TEMPLATE,
            include_str!("install-provider.sh.tera"),
        )
        .map_err(template_error)?;
        tera.add_raw_template(
            EXTRACT_CONFIG_TEMPLATE,
            include_str!("extract-config.sh.tera"),
        )
        .map_err(template_error)?;

        Ok(Self { tera })
    }

    /// Render a template with a serializable context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        debug!("Rendering template: {}", template_name);
        let context = Context::from_serialize(context).map_err(template_error)?;
        self.tera
            .render(template_name, &context)
            .map_err(template_error)
    }
}

/// Quote a string for POSIX sh as a single-quoted word
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn shell_quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("shell_quote expects a string"))?;
    Ok(Value::String(shell_quote(s)))
}

/// Flatten a Tera error and its sources into one message
fn template_error(e: tera::Error) -> Error {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = std::error::Error::source(inner);
    }
    Error::template(message)
}
