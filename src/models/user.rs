//! Authenticated user claims and access roles

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Account role carried by every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    /// Professor record bound to a teacher account
    #[serde(default)]
    pub professor_id: Option<i32>,
    /// Student record bound to a student account
    #[serde(default)]
    pub student_id: Option<i32>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Allow admins, the professor and the student of a conversation
    pub fn require_chat_participant(&self, professor_id: i32, student_id: i32) -> Result<(), AppError> {
        let allowed = match self.role {
            UserRole::Admin => true,
            UserRole::Teacher => self.professor_id == Some(professor_id),
            UserRole::Student => self.student_id == Some(student_id),
        };
        if allowed {
            Ok(())
        } else {
            Err(AppError::Authorization("Not a participant of this conversation".to_string()))
        }
    }

    /// Allow admins and the teacher bound to `professor_id`
    pub fn require_professor(&self, professor_id: i32) -> Result<(), AppError> {
        if self.is_admin() || (self.role == UserRole::Teacher && self.professor_id == Some(professor_id)) {
            Ok(())
        } else {
            Err(AppError::Authorization("Access restricted to this professor".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole, professor_id: Option<i32>, student_id: Option<i32>) -> UserClaims {
        let now = chrono::Utc::now().timestamp();
        UserClaims {
            sub: "user".to_string(),
            user_id: 1,
            role,
            professor_id,
            student_id,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let original = claims(UserRole::Teacher, Some(4), None);
        let token = original.create_token("secret").unwrap();
        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.role, UserRole::Teacher);
        assert_eq!(decoded.professor_id, Some(4));

        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_chat_participants() {
        assert!(claims(UserRole::Admin, None, None).require_chat_participant(1, 2).is_ok());
        assert!(claims(UserRole::Teacher, Some(1), None).require_chat_participant(1, 2).is_ok());
        assert!(claims(UserRole::Teacher, Some(3), None).require_chat_participant(1, 2).is_err());
        assert!(claims(UserRole::Student, None, Some(2)).require_chat_participant(1, 2).is_ok());
        assert!(claims(UserRole::Student, None, Some(5)).require_chat_participant(1, 2).is_err());
    }

    #[test]
    fn test_require_admin() {
        assert!(claims(UserRole::Admin, None, None).require_admin().is_ok());
        assert!(claims(UserRole::Teacher, Some(1), None).require_admin().is_err());
    }
}
