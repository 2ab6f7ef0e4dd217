//! Professor model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EmploymentType;

/// Professor record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Professor {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub employment_type: EmploymentType,
    pub department_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal professor identity, as shown in role maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfessorShort {
    pub id: i32,
    pub name: String,
    pub surname: String,
}

/// Filter on professors and students lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DepartmentFilter {
    pub department_id: Option<i32>,
}

/// Create professor request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfessor {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub specialty: Option<String>,
    #[serde(default)]
    pub employment_type: EmploymentType,
    pub department_id: i32,
}

/// Update professor request; only supplied fields change
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfessor {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub surname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub specialty: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub department_id: Option<i32>,
}

/// Attach a student to a supervising professor
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddStudentRequest {
    pub student_id: i32,
}
