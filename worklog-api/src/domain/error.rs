use std::fmt;

use itertools::Itertools;
use thiserror::Error;

/// A single rejected field on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub message: String,
}

/// Rejection of a record that fails its schema checks.
///
/// Renders like `loggedWork validation failed: user: Path `user` is required.`,
/// one `path: message` clause per field, comma separated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{model} validation failed: {}", render_fields(.fields))]
pub struct ValidationError {
    model: &'static str,
    fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            fields: Vec::new(),
        }
    }

    pub fn required(mut self, path: &'static str) -> Self {
        self.fields.push(FieldError {
            path,
            message: format!("Path `{path}` is required."),
        });
        self
    }

    pub fn invalid(mut self, path: &'static str, message: impl Into<String>) -> Self {
        self.fields.push(FieldError {
            path,
            message: message.into(),
        });
        self
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// `Ok(())` when no field was rejected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn render_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|field| format!("{}: {}", field.path, field.message))
        .join(", ")
}

/// Errors that can occur in project, logged work and account operations.
#[derive(Debug, Error)]
pub enum WorklogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} was modified concurrently")]
    Conflict(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not authenticated")]
    Unauthenticated,
    #[error("admin privileges required")]
    Forbidden,
    #[error("{0}")]
    Storage(String),
}

impl WorklogError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }
}
