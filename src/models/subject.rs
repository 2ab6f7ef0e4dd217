//! Subject (project topic) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{enums::SubjectStatus, professor_role::RoleMap, student::Student};

/// Subject record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Free text list of technologies
    pub technologies: String,
    pub department_id: i32,
    pub student_id: Option<i32>,
    pub status: SubjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subject with its linked student and role map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubjectDetails {
    #[serde(flatten)]
    pub subject: Subject,
    pub student: Option<Student>,
    pub roles: RoleMap,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SubjectQuery {
    pub department_id: Option<i32>,
    pub status: Option<SubjectStatus>,
}

/// Create subject request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub technologies: String,
    pub department_id: i32,
    pub student_id: Option<i32>,
}

/// Update subject request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub technologies: String,
    pub department_id: i32,
    pub student_id: Option<i32>,
    /// Left unchanged when omitted
    pub status: Option<SubjectStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSubjectStatus {
    pub status: SubjectStatus,
}
