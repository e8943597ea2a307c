//! Local validation errors.
//!
//! These never leave the client: a form that fails validation is reported
//! inline, field by field, and no request is issued.

use thiserror::Error;

/// A single invalid form field, identified by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the error belongs to.
    pub field: &'static str,
    /// Translation key of the message shown next to the field.
    pub message_key: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message_key: &'static str) -> Self {
        Self { field, message_key }
    }
}

/// All field errors of one form submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("form validation failed on {} field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// First error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

/// Collects field errors while a form is being checked.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: Vec<FieldError>,
}

impl ErrorCollector {
    pub(crate) fn push(&mut self, field: &'static str, message_key: &'static str) {
        self.errors.push(FieldError::new(field, message_key));
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
