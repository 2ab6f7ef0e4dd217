//! Subject endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        professor::DepartmentFilter,
        subject::{CreateSubject, SubjectDetails, SubjectQuery, UpdateSubject, UpdateSubjectStatus},
    },
};

use super::AuthenticatedUser;

/// List subjects with their student and role holders
#[utoipa::path(
    get,
    path = "/subjects",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(SubjectQuery),
    responses(
        (status = 200, description = "List of subjects", body = Vec<SubjectDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_subjects(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<SubjectQuery>,
) -> AppResult<Json<Vec<SubjectDetails>>> {
    let subjects = state.services.subjects.list(&query).await?;
    Ok(Json(subjects))
}

/// List approved subjects
#[utoipa::path(
    get,
    path = "/subjects/approved",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "Approved subjects", body = Vec<SubjectDetails>)
    )
)]
pub async fn list_approved_subjects(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<SubjectDetails>>> {
    let subjects = state.services.subjects.list_approved(filter.department_id).await?;
    Ok(Json(subjects))
}

/// Get subject by ID
#[utoipa::path(
    get,
    path = "/subjects/{id}",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject details", body = SubjectDetails),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn get_subject(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SubjectDetails>> {
    let subject = state.services.subjects.get(id).await?;
    Ok(Json(subject))
}

/// Create a subject; new subjects start as pending
#[utoipa::path(
    post,
    path = "/subjects",
    tag = "subjects",
    security(("bearer_auth" = [])),
    request_body = CreateSubject,
    responses(
        (status = 201, description = "Subject created", body = SubjectDetails),
        (status = 422, description = "Invalid input or unknown department/student")
    )
)]
pub async fn create_subject(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<SubjectDetails>)> {
    claims.require_admin()?;

    let created = state.services.subjects.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a subject
#[utoipa::path(
    put,
    path = "/subjects/{id}",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    request_body = UpdateSubject,
    responses(
        (status = 200, description = "Subject updated", body = SubjectDetails),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn update_subject(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSubject>,
) -> AppResult<Json<SubjectDetails>> {
    claims.require_admin()?;

    let updated = state.services.subjects.update(id, &data).await?;
    Ok(Json(updated))
}

/// Change the review status of a subject
#[utoipa::path(
    put,
    path = "/subjects/{id}/status",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectStatus,
    responses(
        (status = 200, description = "Status updated", body = SubjectDetails),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn update_subject_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateSubjectStatus>,
) -> AppResult<Json<SubjectDetails>> {
    claims.require_admin()?;

    let updated = state.services.subjects.update_status(id, request.status).await?;
    Ok(Json(updated))
}

/// Delete a subject and its roles
#[utoipa::path(
    delete,
    path = "/subjects/{id}",
    tag = "subjects",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn delete_subject(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.subjects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
