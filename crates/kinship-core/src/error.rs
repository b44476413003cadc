//! Error types for Kinship Core

use thiserror::Error;

use crate::person::PersonId;
use crate::violation::Violation;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinship error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Parent person not found: {0}")]
    ParentNotFound(PersonId),

    #[error("Parent relationship not found: {parent} -> {child}")]
    RelationshipNotFound { parent: PersonId, child: PersonId },

    #[error("parentId is required")]
    MissingParentId,

    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Violations carried by a validation error, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
