//! Error types for the PFE server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::enums::RoleType;

/// Application error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    Duplicate = 6,
    InvalidReference = 10,
    MissingSupervisor = 11,
    TooManyRolesForProfessor = 12,
    DuplicateRoleAssignment = 13,
    RoleAlreadyAssigned = 14,
    RoleTypeTaken = 15,
    RoleNotFound = 16,
    SupervisorRequired = 17,
    StorageUnavailable = 18,
}

/// Failures of the professor role assignment engine.
///
/// Every variant is detected before any mutation is committed; a failing
/// call leaves the subject's stored role set unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    #[error("Subject {0} not found")]
    NotFound(i32),

    #[error("Professor {0} does not exist")]
    InvalidReference(i32),

    #[error("A supervisor (encadrant) is required")]
    MissingSupervisor,

    #[error("Professor {0} cannot hold more than two roles on the same subject")]
    TooManyRolesForProfessor(i32),

    #[error("Professor {professor_id} is listed twice as {role_type}")]
    DuplicateRoleAssignment { professor_id: i32, role_type: RoleType },

    #[error("Professor {professor_id} already holds the {role_type} role on this subject")]
    RoleAlreadyAssigned { professor_id: i32, role_type: RoleType },

    #[error("The {0} role is already held by another professor")]
    RoleTypeTaken(RoleType),

    #[error("Role not found for professor {0} on this subject")]
    RoleNotFound(i32),

    #[error("The supervisor cannot be removed without a replacement")]
    SupervisorRequired,

    #[error("Role storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl RoleError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            RoleError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData),
            RoleError::InvalidReference(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InvalidReference)
            }
            RoleError::MissingSupervisor => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::MissingSupervisor)
            }
            RoleError::TooManyRolesForProfessor(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::TooManyRolesForProfessor,
            ),
            RoleError::DuplicateRoleAssignment { .. } => {
                (StatusCode::CONFLICT, ErrorCode::DuplicateRoleAssignment)
            }
            RoleError::RoleAlreadyAssigned { .. } => {
                (StatusCode::CONFLICT, ErrorCode::RoleAlreadyAssigned)
            }
            RoleError::RoleTypeTaken(_) => (StatusCode::CONFLICT, ErrorCode::RoleTypeTaken),
            RoleError::RoleNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::RoleNotFound),
            RoleError::SupervisorRequired => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::SupervisorRequired)
            }
            RoleError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::StorageUnavailable)
            }
        }
    }
}

impl From<sqlx::Error> for RoleError {
    fn from(e: sqlx::Error) -> Self {
        RoleError::StorageUnavailable(e.to_string())
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error(transparent)]
    Role(#[from] RoleError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::BadValue),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
            AppError::BusinessRule(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::Failure),
            AppError::Role(e) => e.status_and_code(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Role(RoleError::StorageUnavailable(msg)) => {
                tracing::error!("Role storage error: {}", msg);
                "Role storage unavailable, retry later".to_string()
            }
            AppError::Authentication(msg)
            | AppError::Authorization(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::BusinessRule(msg) => msg.clone(),
            AppError::Role(e) => e.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
