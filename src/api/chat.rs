//! Chat endpoints between a professor and a student

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        chat_message::{ChatMessage, SendMessage, UnreadCount},
        enums::SenderType,
        user::UserRole,
    },
};

use super::AuthenticatedUser;

/// Messages of a conversation, oldest first
#[utoipa::path(
    get,
    path = "/chat/{professor_id}/{student_id}",
    tag = "chat",
    security(("bearer_auth" = [])),
    params(
        ("professor_id" = i32, Path, description = "Professor ID"),
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Conversation", body = Vec<ChatMessage>),
        (status = 403, description = "Not a participant")
    )
)]
pub async fn get_conversation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((professor_id, student_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    claims.require_chat_participant(professor_id, student_id)?;

    let messages = state.services.chat.messages(professor_id, student_id).await?;
    Ok(Json(messages))
}

/// Send a message
#[utoipa::path(
    post,
    path = "/chat/send",
    tag = "chat",
    security(("bearer_auth" = [])),
    request_body = SendMessage,
    responses(
        (status = 201, description = "Message stored", body = ChatMessage),
        (status = 403, description = "Not a participant"),
        (status = 422, description = "Invalid message or unknown participant")
    )
)]
pub async fn send_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    claims.require_chat_participant(data.professor_id, data.student_id)?;

    let impersonating = match claims.role {
        UserRole::Admin => false,
        UserRole::Teacher => data.sender_type != SenderType::Professor,
        UserRole::Student => data.sender_type != SenderType::Student,
    };
    if impersonating {
        return Err(AppError::Authorization(
            "Sender type does not match the authenticated user".to_string(),
        ));
    }

    let message = state.services.chat.send(&data).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Mark a message as read
#[utoipa::path(
    put,
    path = "/chat/mark-read/{id}",
    tag = "chat",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message marked as read", body = ChatMessage),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_message_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ChatMessage>> {
    let message = state.services.chat.get(id).await?;
    claims.require_chat_participant(message.professor_id, message.student_id)?;

    let message = state.services.chat.mark_read(id).await?;
    Ok(Json(message))
}

/// Number of unread student messages for a professor
#[utoipa::path(
    get,
    path = "/chat/unread/{professor_id}",
    tag = "chat",
    security(("bearer_auth" = [])),
    params(
        ("professor_id" = i32, Path, description = "Professor ID")
    ),
    responses(
        (status = 200, description = "Unread count", body = UnreadCount),
        (status = 403, description = "Not this professor")
    )
)]
pub async fn get_unread_count(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(professor_id): Path<i32>,
) -> AppResult<Json<UnreadCount>> {
    claims.require_professor(professor_id)?;

    let unread_count = state.services.chat.unread_count(professor_id).await?;
    Ok(Json(UnreadCount { unread_count }))
}
