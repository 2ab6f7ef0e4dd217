//! Chat message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::SenderType;

/// Message exchanged between a professor and a student
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ChatMessage {
    pub id: i32,
    pub professor_id: i32,
    pub student_id: i32,
    pub message: String,
    pub sender_type: SenderType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessage {
    pub professor_id: i32,
    pub student_id: i32,
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
    pub sender_type: SenderType,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub unread_count: i64,
}
