//! Department endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::department::{Department, DepartmentDetails, DepartmentInput, DepartmentSummary},
};

use super::AuthenticatedUser;

/// List departments with their professor counts
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of departments", body = Vec<DepartmentSummary>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<DepartmentSummary>>> {
    let departments = state.services.departments.list().await?;
    Ok(Json(departments))
}

/// Get a department with its professors and subjects
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department details", body = DepartmentDetails),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DepartmentDetails>> {
    let department = state.services.departments.get(id).await?;
    Ok(Json(department))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = DepartmentInput,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 422, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Name or code already used")
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<DepartmentInput>,
) -> AppResult<(StatusCode, Json<Department>)> {
    claims.require_admin()?;

    let created = state.services.departments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    request_body = DepartmentInput,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Name or code already used")
    )
)]
pub async fn update_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<DepartmentInput>,
) -> AppResult<Json<Department>> {
    claims.require_admin()?;

    let updated = state.services.departments.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a department without professors, students or subjects
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 422, description = "Department still referenced")
    )
)]
pub async fn delete_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.departments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
