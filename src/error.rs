//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A single problem found while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The dotted path of the offending field, e.g. `entries.1.categoryId`.
    pub path: String,
    /// What is wrong with the field.
    pub message: String,
}

/// The errors that may occur in the application.
///
/// Every operation returns either its success value or exactly one of these
/// variants. The variants serialize as an object tagged by `_tag` so clients
/// can branch on the kind of failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "_tag")]
pub enum Error {
    /// The request was malformed or a value was out of range.
    ///
    /// Always raised before anything is written.
    #[error("{message}")]
    #[serde(rename = "ValidationError")]
    Validation {
        /// A summary of the failure.
        message: String,
        /// The individual fields that failed validation.
        issues: Vec<ValidationIssue>,
    },

    /// The referenced entity does not exist.
    #[error("{resource} with id {id} could not be found")]
    #[serde(rename = "NotFoundError")]
    NotFound {
        /// The kind of entity, e.g. "Account".
        resource: String,
        /// The id that was looked up.
        id: String,
    },

    /// A uniqueness rule was violated, e.g. a duplicate category name.
    #[error("{message}")]
    #[serde(rename = "ConflictError")]
    Conflict {
        /// A description of the conflict.
        message: String,
        /// The kind of entity that clashed.
        resource: String,
    },

    /// A referential or business rule blocks the operation, e.g. deleting an
    /// account that still has snapshots.
    #[error("{message}")]
    #[serde(rename = "ConstraintError")]
    Constraint {
        /// A description of the violated rule.
        message: String,
        /// A short machine-readable name for the rule.
        constraint: String,
    },

    /// The store operation itself failed.
    ///
    /// The message is only written to the server logs. Responses carry a
    /// generic message instead.
    #[error("database error: {message}")]
    #[serde(rename = "DatabaseError")]
    Database {
        /// A description of the failure.
        message: String,
    },
}

impl Error {
    /// A validation error for a single field.
    pub fn validation(path: &str, message: &str) -> Self {
        Self::Validation {
            message: "Validation failed".to_owned(),
            issues: vec![ValidationIssue {
                path: path.to_owned(),
                message: message.to_owned(),
            }],
        }
    }

    /// A validation error made up of several field issues.
    pub fn validation_issues(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation {
            message: "Validation failed".to_owned(),
            issues,
        }
    }

    /// The entity `resource` with `id` does not exist.
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_owned(),
            id: id.to_string(),
        }
    }

    /// A uniqueness violation on `resource`.
    pub fn conflict(message: &str, resource: &str) -> Self {
        Self::Conflict {
            message: message.to_owned(),
            resource: resource.to_owned(),
        }
    }

    /// A business rule named `constraint` blocks the operation.
    pub fn constraint(message: &str, constraint: &str) -> Self {
        Self::Constraint {
            message: message.to_owned(),
            constraint: constraint.to_owned(),
        }
    }

    /// Summing or dividing stored amounts went past the range of a decimal.
    pub fn amount_overflow() -> Self {
        Self::validation("amount", "Amounts are too large to add up")
    }

    /// The mutex guarding the database connection was poisoned.
    pub fn database_lock() -> Self {
        Self::Database {
            message: "could not acquire the database lock".to_owned(),
        }
    }

    /// The name of the variant as it appears in the `_tag` field.
    pub fn tag(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "ValidationError",
            Error::NotFound { .. } => "NotFoundError",
            Error::Conflict { .. } => "ConflictError",
            Error::Constraint { .. } => "ConstraintError",
            Error::Database { .. } => "DatabaseError",
        }
    }

    /// The HTTP status code to respond with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } | Error::Constraint { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error with its tag and the operation it came from.
    ///
    /// Client mistakes are logged at `warn`, store failures at `error`.
    pub fn log(&self, context: &str) {
        match self {
            Error::Validation { message, issues } => {
                tracing::warn!(tag = self.tag(), "[{context}] {message}: {issues:?}")
            }
            Error::NotFound { resource, id } => {
                tracing::warn!(tag = self.tag(), "[{context}] {resource} with id {id} not found")
            }
            Error::Conflict { message, resource } => {
                tracing::warn!(tag = self.tag(), "[{context}] {message} ({resource})")
            }
            Error::Constraint {
                message,
                constraint,
            } => tracing::warn!(tag = self.tag(), "[{context}] {message} ({constraint})"),
            Error::Database { message } => {
                tracing::error!(tag = self.tag(), "[{context}] {message}")
            }
        }
    }
}

/// Returns true if `error` is a violated UNIQUE constraint.
pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    // Code 2067 occurs when a UNIQUE constraint failed.
    matches!(
        error,
        rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 2067
    )
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(_, Some(ref description))
                if is_unique_violation(&value) =>
            {
                Error::Conflict {
                    message: "a record with the same unique value already exists".to_owned(),
                    resource: description.clone(),
                }
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::Database {
                    message: error.to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation {
            message: "Invalid request body".to_owned(),
            issues: vec![ValidationIssue {
                path: "body".to_owned(),
                message: rejection.body_text(),
            }],
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation {
            message: "Invalid query parameters".to_owned(),
            issues: vec![ValidationIssue {
                path: "query".to_owned(),
                message: rejection.body_text(),
            }],
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation {
            message: "Invalid path parameter".to_owned(),
            issues: vec![ValidationIssue {
                path: "id".to_owned(),
                message: rejection.body_text(),
            }],
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a Error,
}

/// The message sent to clients in place of a database error's details.
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let error = match self {
            Error::Database { .. } => Error::Database {
                message: INTERNAL_ERROR_MESSAGE.to_owned(),
            },
            error => error,
        };

        (error.status_code(), Json(ErrorBody { error: &error })).into_response()
    }
}
