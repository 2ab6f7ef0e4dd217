//! Chat messages repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        chat_message::{ChatMessage, SendMessage},
        enums::SenderType,
    },
};

#[derive(Clone)]
pub struct ChatRepository {
    pool: Pool<Postgres>,
}

impl ChatRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Conversation between a professor and a student, oldest first
    pub async fn conversation(&self, professor_id: i32, student_id: i32) -> AppResult<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM chat_messages
            WHERE professor_id = $1 AND student_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(professor_id)
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }

    pub async fn create(&self, data: &SendMessage) -> AppResult<ChatMessage> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (professor_id, student_id, message, sender_type, is_read,
                                       created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING *
            "#,
        )
        .bind(data.professor_id)
        .bind(data.student_id)
        .bind(&data.message)
        .bind(data.sender_type)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn mark_read(&self, id: i32) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            "UPDATE chat_messages SET is_read = TRUE, updated_at = $1 WHERE id = $2 RETURNING *",
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }

    /// Unread messages sent by students to a professor
    pub async fn count_unread_for_professor(&self, professor_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM chat_messages
            WHERE professor_id = $1 AND sender_type = $2 AND is_read = FALSE
            "#,
        )
        .bind(professor_id)
        .bind(SenderType::Student)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
