//! Configuration schema for Roster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default remote collection endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Root config for Roster.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl RosterConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RosterConfigBuilder {
        RosterConfigBuilder::new()
    }
}

/// Builder for assembling a `RosterConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RosterConfigBuilder {
    config: RosterConfig,
}

impl RosterConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RosterConfig::default(),
        }
    }

    /// Replace the remote endpoint configuration.
    pub fn remote(mut self, remote: RemoteConfig) -> Self {
        self.config.remote = remote;
        self
    }

    /// Point the remote resource at a different collection URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.remote.base_url = base_url.into();
        self
    }

    /// Replace the form layout configuration.
    pub fn form(mut self, form: FormConfig) -> Self {
        self.config.form = form;
        self
    }

    /// Replace the validation rule configuration.
    pub fn validation(mut self, validation: ValidationConfig) -> Self {
        self.config.validation = validation;
        self
    }

    /// Finalize and return the built `RosterConfig`.
    pub fn build(self) -> RosterConfig {
        self.config
    }
}

/// Remote resource endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Collection URL used for both `GET` (list) and `POST` (create).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional per-request timeout; requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Optional `User-Agent` override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Single input rendered in the record form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormFieldConfig {
    /// Field name, used as the input `name` attribute and snapshot key.
    pub name: String,
    /// Label shown before the input.
    pub label: String,
}

impl FormFieldConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Record form layout and initial values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Inputs in display order.
    #[serde(default = "default_form_fields")]
    pub fields: Vec<FormFieldConfig>,
    /// Values bound to the form on first render and after a successful create.
    #[serde(default = "default_initial_values")]
    pub initial_values: BTreeMap<String, String>,
    /// Label of the submit button.
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: default_form_fields(),
            initial_values: default_initial_values(),
            submit_label: default_submit_label(),
        }
    }
}

fn default_form_fields() -> Vec<FormFieldConfig> {
    vec![
        FormFieldConfig::new("name", "Name:"),
        FormFieldConfig::new("email", "Email:"),
    ]
}

fn default_initial_values() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("name".to_string(), String::new()),
        ("email".to_string(), String::new()),
    ])
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

/// A presence rule: the field must be submitted with a non-empty value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredFieldRule {
    pub field: String,
    pub message: String,
}

impl RequiredFieldRule {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation rules applied before a record is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_required_rules")]
    pub required: Vec<RequiredFieldRule>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required: default_required_rules(),
        }
    }
}

fn default_required_rules() -> Vec<RequiredFieldRule> {
    vec![
        RequiredFieldRule::new("name", "name is required"),
        RequiredFieldRule::new("email", "email is required"),
    ]
}
