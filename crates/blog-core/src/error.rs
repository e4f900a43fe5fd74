//! Domain-level error types.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// A required post attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Title,
    Content,
}

impl PostField {
    pub fn label(self) -> &'static str {
        match self {
            PostField::Title => "Title",
            PostField::Content => "Content",
        }
    }
}

/// Required fields that were blank after trimming, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.blank))]
pub struct ValidationError {
    pub blank: Vec<PostField>,
}

impl ValidationError {
    /// Field-level messages suitable for re-prompting the user.
    pub fn messages(&self) -> Vec<String> {
        self.blank.iter().copied().map(blank_message).collect()
    }

    pub fn is_blank(&self, field: PostField) -> bool {
        self.blank.contains(&field)
    }
}

fn blank_message(field: PostField) -> String {
    format!("{} can't be blank", field.label())
}

fn join_messages(blank: &[PostField]) -> String {
    blank
        .iter()
        .copied()
        .map(blank_message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
