use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DbId;

/// Key under which errors spanning more than one field are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{}", .0.summary())]
    InvalidFields(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Machine-readable code (e.g. `required`, `blank`, `invalid`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Field-level validation failures keyed by field name.
///
/// Serializes as `{ "field": [{ "code": ..., "message": ... }] }`. A
/// `BTreeMap` keeps the output order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldError>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure against `field`.
    pub fn add(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(FieldError {
                code: code.to_string(),
                message: message.into(),
            });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failures recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[FieldError]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of every field with at least one failure.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// One-line description suitable for the `error` field of a response.
    pub fn summary(&self) -> String {
        match self.0.len() {
            1 => {
                let field = self.0.keys().next().map(String::as_str).unwrap_or_default();
                format!("Validation failed for field '{field}'")
            }
            n => format!("Validation failed for {n} fields"),
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field_name, field_errors) in err.field_errors() {
            for e in field_errors {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Field '{field_name}' failed validation: {}", e.code));
                fields.add(&field_name, &e.code, message);
            }
        }
        fields
    }
}
