//! Department model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{professor::Professor, subject::Subject};

/// Department record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    /// Short code, always uppercase
    pub code: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Department with the number of attached professors (list view)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DepartmentSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub department: Department,
    pub professors_count: i64,
}

/// Department with its professors and subjects
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDetails {
    #[serde(flatten)]
    pub department: Department,
    pub professors_count: i64,
    pub professors: Vec<Professor>,
    pub subjects: Vec<Subject>,
}

/// Create or update department request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DepartmentInput {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 10, message = "Code must be 1-10 characters"))]
    pub code: String,
    pub description: Option<String>,
}

impl DepartmentInput {
    /// Codes are stored uppercase
    pub fn normalized_code(&self) -> String {
        self.code.trim().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let input = DepartmentInput {
            name: "Informatique".to_string(),
            code: " info ".to_string(),
            description: None,
        };
        assert_eq!(input.normalized_code(), "INFO");
    }

    #[test]
    fn test_code_length_validated() {
        let input = DepartmentInput {
            name: "Mathématiques".to_string(),
            code: "MATHEMATICS".to_string(),
            description: None,
        };
        assert!(input.validate().is_err());
    }
}
