//! Polling chat between a professor and a student

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::chat_message::{ChatMessage, SendMessage},
    repository::Repository,
};

#[derive(Clone)]
pub struct ChatService {
    repository: Repository,
}

impl ChatService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn messages(&self, professor_id: i32, student_id: i32) -> AppResult<Vec<ChatMessage>> {
        self.repository.chat.conversation(professor_id, student_id).await
    }

    pub async fn get(&self, id: i32) -> AppResult<ChatMessage> {
        self.repository.chat.get_by_id(id).await
    }

    /// Store a new unread message; both parties must exist
    pub async fn send(&self, data: &SendMessage) -> AppResult<ChatMessage> {
        data.validate()?;

        if !self.repository.professors.exists(data.professor_id).await? {
            return Err(AppError::Validation(format!("Professor {} does not exist", data.professor_id)));
        }
        if !self.repository.students.exists(data.student_id).await? {
            return Err(AppError::Validation(format!("Student {} does not exist", data.student_id)));
        }

        let message = self.repository.chat.create(data).await?;
        tracing::debug!(
            id = message.id,
            professor_id = data.professor_id,
            student_id = data.student_id,
            sender = %data.sender_type,
            "Chat message stored"
        );
        Ok(message)
    }

    pub async fn mark_read(&self, id: i32) -> AppResult<ChatMessage> {
        self.repository.chat.mark_read(id).await
    }

    pub async fn unread_count(&self, professor_id: i32) -> AppResult<i64> {
        self.repository.chat.count_unread_for_professor(professor_id).await
    }
}
