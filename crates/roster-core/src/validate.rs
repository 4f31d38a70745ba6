//! Client-side record validation.

use roster_config::ValidationConfig;
use roster_protocol::{FormSnapshot, Record, ValidationErrors};

/// Source of field values that rules can inspect.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for FormSnapshot {
    fn field(&self, name: &str) -> Option<&str> {
        self.value(name)
    }
}

impl FieldSource for Record {
    fn field(&self, name: &str) -> Option<&str> {
        Record::field(self, name)
    }
}

/// A single validation rule. Rules report failures into `errors` and never
/// touch anything else.
pub trait ValidationRule: Send + Sync {
    fn check(&self, candidate: &dyn FieldSource, errors: &mut ValidationErrors);
}

/// Presence check: the field must exist and be non-empty. Whitespace counts
/// as content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField {
    field: String,
    message: String,
}

impl RequiredField {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ValidationRule for RequiredField {
    fn check(&self, candidate: &dyn FieldSource, errors: &mut ValidationErrors) {
        if candidate.field(&self.field).is_none_or(str::is_empty) {
            errors.insert(self.field.as_str(), self.message.as_str());
        }
    }
}

/// Ordered rule set applied to every candidate record.
pub struct RecordValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RecordValidator {
    /// A validator with no rules; every candidate passes.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build the rule set described by config.
    pub fn from_config(config: &ValidationConfig) -> Self {
        config
            .required
            .iter()
            .fold(Self::empty(), |validator, rule| {
                validator.with_rule(RequiredField::new(&rule.field, &rule.message))
            })
    }

    /// Append a rule. Rules run in insertion order; the first message per field wins.
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run every rule against the candidate. An empty result means valid.
    pub fn validate(&self, candidate: &dyn FieldSource) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            rule.check(candidate, &mut errors);
        }
        errors
    }
}

impl Default for RecordValidator {
    /// `name` and `email` are required.
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl std::fmt::Debug for RecordValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordValidator")
            .field("rules", &self.rules.len())
            .finish()
    }
}
