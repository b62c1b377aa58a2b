//! Structured validation failures

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found while validating one set of options
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", self.describe())]
pub struct ValidationError {
    client: Option<String>,
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self {
            client: None,
            violations,
        }
    }

    /// Attach the name of the client whose options failed
    pub fn for_client(mut self, name: impl Into<String>) -> Self {
        self.client = Some(name.into());
        self
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields, in the order they were checked
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    fn describe(&self) -> String {
        let details = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        match &self.client {
            Some(name) => format!("Invalid options for external client '{}': {}", name, details),
            None => format!("Invalid external client options: {}", details),
        }
    }
}
