//! Student model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::InternshipType;

/// Student record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub internship_type: Option<InternshipType>,
    pub department_id: i32,
    /// Supervising professor, set directly and independent of subject roles
    pub supervisor_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create or update student request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StudentInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub internship_type: Option<InternshipType>,
    pub department_id: i32,
}

/// Lookup by email
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
pub struct EmailQuery {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
