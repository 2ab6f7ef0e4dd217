//! Student endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        professor::{DepartmentFilter, Professor},
        student::{EmailQuery, Student, StudentInput},
    },
};

use super::AuthenticatedUser;

/// List students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "List of students", body = Vec<Student>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.students.list(filter.department_id).await?;
    Ok(Json(students))
}

/// Find a student by email
#[utoipa::path(
    get,
    path = "/students/by-email",
    tag = "students",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "Matching student", body = Student),
        (status = 404, description = "No student with this email")
    )
)]
pub async fn find_student_by_email(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Student>> {
    query.validate()?;

    state
        .services
        .students
        .find_by_email(&query.email)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No student with email {}", query.email)))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Student>> {
    let student = state.services.students.get_by_id(id).await?;
    Ok(Json(student))
}

/// Supervisor of a student, `null` when unsupervised
#[utoipa::path(
    get,
    path = "/students/{id}/supervisor",
    tag = "students",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Supervisor", body = Option<Professor>),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student_supervisor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<Professor>>> {
    let supervisor = state.services.students.supervisor(id).await?;
    Ok(Json(supervisor))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    request_body = StudentInput,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 409, description = "Email already used"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<StudentInput>,
) -> AppResult<(StatusCode, Json<Student>)> {
    claims.require_admin()?;

    let created = state.services.students.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Email already used")
    )
)]
pub async fn update_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<StudentInput>,
) -> AppResult<Json<Student>> {
    claims.require_admin()?;

    let updated = state.services.students.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
