use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// The five operations every resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {operation} {resource}")]
    Forbidden { operation: Operation, resource: &'static str },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{operation} {resource} {id}: no rows affected")]
    ZeroRowsAffected { operation: Operation, resource: &'static str, id: i64 },
    #[error("storage error ({context}): {source}")]
    Storage {
        context: String,
        #[source]
        source: DbErr,
    },
    #[error("call cancelled")]
    Cancelled,
}

impl ServiceError {
    pub fn forbidden(operation: Operation, resource: &'static str) -> Self {
        Self::Forbidden { operation, resource }
    }

    pub fn zero_rows(operation: Operation, resource: &'static str, id: i64) -> Self {
        Self::ZeroRowsAffected { operation, resource, id }
    }

    /// Wrap a storage error with the operation and entity it happened on.
    pub fn storage(operation: Operation, resource: &str, id: Option<i64>, source: DbErr) -> Self {
        let context = match id {
            Some(id) => format!("{operation} {resource} {id}"),
            None => format!("{operation} {resource}"),
        };
        Self::Storage { context, source }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Unauthenticated(_) => 1001,
            ServiceError::Forbidden { .. } => 1002,
            ServiceError::Validation(_) => 1003,
            ServiceError::ZeroRowsAffected { .. } => 1004,
            ServiceError::Cancelled => 1005,
            ServiceError::Storage { .. } => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => Self::Validation(msg),
            models::errors::ModelError::Db(msg) => Self::Storage { context: "model".into(), source: DbErr::Custom(msg) },
        }
    }
}
