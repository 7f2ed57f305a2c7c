//! Service error taxonomy

use uuid::Uuid;

use crate::auth::authorization::AuthzError;
use crate::store::StoreError;

/// Errors returned by board, list and task operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced board, list, task or user does not exist
    #[error("{entity} not found with id of {id}")]
    NotFound { entity: &'static str, id: String },

    /// Actor lacks owner or member standing
    #[error("{0}")]
    Forbidden(String),

    /// Request is well-formed but not allowed in the current state
    #[error("{0}")]
    InvalidOperation(String),

    /// Input failed schema validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Persistence or programming fault
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Creates a not-found error for an entity addressed by ID
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an invalid-operation error
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::InvalidOperation(message.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Unexpected(err.to_string())
    }
}

impl From<AuthzError> for ServiceError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::BoardNotFound(id) => ServiceError::not_found("Board", id),
            AuthzError::NotMember { .. } | AuthzError::NotOwner { .. } => {
                ServiceError::Forbidden(err.to_string())
            }
            AuthzError::Store(e) => e.into(),
        }
    }
}

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
