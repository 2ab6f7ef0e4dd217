//! Professor endpoints, including supervision and per-professor role changes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        professor::{AddStudentRequest, CreateProfessor, DepartmentFilter, Professor, UpdateProfessor},
        professor_role::{AssignSingleRoleRequest, ProfessorRole, RemoveRoleQuery},
        student::Student,
    },
};

use super::{AuthenticatedUser, MessageResponse};

/// List professors
#[utoipa::path(
    get,
    path = "/professors",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "List of professors", body = Vec<Professor>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_professors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<Professor>>> {
    let professors = state.services.professors.list(filter.department_id).await?;
    Ok(Json(professors))
}

/// Get professor by ID
#[utoipa::path(
    get,
    path = "/professors/{id}",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID")
    ),
    responses(
        (status = 200, description = "Professor details", body = Professor),
        (status = 404, description = "Professor not found")
    )
)]
pub async fn get_professor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Professor>> {
    let professor = state.services.professors.get_by_id(id).await?;
    Ok(Json(professor))
}

/// Create a professor
#[utoipa::path(
    post,
    path = "/professors",
    tag = "professors",
    security(("bearer_auth" = [])),
    request_body = CreateProfessor,
    responses(
        (status = 201, description = "Professor created", body = Professor),
        (status = 409, description = "Email already used"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_professor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateProfessor>,
) -> AppResult<(StatusCode, Json<Professor>)> {
    claims.require_admin()?;

    let created = state.services.professors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a professor
#[utoipa::path(
    put,
    path = "/professors/{id}",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID")
    ),
    request_body = UpdateProfessor,
    responses(
        (status = 200, description = "Professor updated", body = Professor),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "Email already used")
    )
)]
pub async fn update_professor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateProfessor>,
) -> AppResult<Json<Professor>> {
    claims.require_admin()?;

    let updated = state.services.professors.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a professor
#[utoipa::path(
    delete,
    path = "/professors/{id}",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID")
    ),
    responses(
        (status = 204, description = "Professor deleted"),
        (status = 404, description = "Professor not found"),
        (status = 422, description = "Professor still supervises a subject")
    )
)]
pub async fn delete_professor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.professors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Students supervised by a professor
#[utoipa::path(
    get,
    path = "/professors/{id}/students",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID")
    ),
    responses(
        (status = 200, description = "Supervised students", body = Vec<Student>),
        (status = 404, description = "Professor not found")
    )
)]
pub async fn list_supervised_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.professors.students(id).await?;
    Ok(Json(students))
}

/// Students without a supervisor
#[utoipa::path(
    get,
    path = "/professors/available-students",
    tag = "professors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unsupervised students", body = Vec<Student>)
    )
)]
pub async fn list_available_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.professors.available_students().await?;
    Ok(Json(students))
}

/// Put a student under the supervision of a professor
#[utoipa::path(
    post,
    path = "/professors/{id}/students",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID")
    ),
    request_body = AddStudentRequest,
    responses(
        (status = 201, description = "Student supervised", body = Student),
        (status = 404, description = "Professor or student not found"),
        (status = 422, description = "Student already has a supervisor")
    )
)]
pub async fn add_supervised_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddStudentRequest>,
) -> AppResult<(StatusCode, Json<Student>)> {
    claims.require_admin()?;

    let student = state.services.professors.add_student(id, request.student_id).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// End the supervision of a student
#[utoipa::path(
    delete,
    path = "/professors/{id}/students/{student_id}",
    tag = "professors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID"),
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Supervision removed", body = MessageResponse),
        (status = 404, description = "Student not supervised by this professor")
    )
)]
pub async fn remove_supervised_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, student_id)): Path<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_admin()?;

    state.services.professors.remove_student(id, student_id).await?;
    Ok(Json(MessageResponse::new("Student removed from professor")))
}

/// Give a professor one role on a subject
#[utoipa::path(
    post,
    path = "/professors/{id}/subjects/{subject_id}/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID"),
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    request_body = AssignSingleRoleRequest,
    responses(
        (status = 201, description = "Role assigned", body = ProfessorRole),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Role already assigned or taken"),
        (status = 422, description = "Role rules violated")
    )
)]
pub async fn assign_professor_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((professor_id, subject_id)): Path<(i32, i32)>,
    Json(request): Json<AssignSingleRoleRequest>,
) -> AppResult<(StatusCode, Json<ProfessorRole>)> {
    claims.require_admin()?;

    let role = state
        .services
        .roles
        .assign_single_role(subject_id, professor_id, request.role_type)
        .await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Remove a role of a professor on a subject
#[utoipa::path(
    delete,
    path = "/professors/{id}/subjects/{subject_id}/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Professor ID"),
        ("subject_id" = i32, Path, description = "Subject ID"),
        RemoveRoleQuery
    ),
    responses(
        (status = 200, description = "Role removed", body = MessageResponse),
        (status = 404, description = "Subject or role not found"),
        (status = 422, description = "Subject would lose its last encadrant")
    )
)]
pub async fn remove_professor_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((professor_id, subject_id)): Path<(i32, i32)>,
    Query(query): Query<RemoveRoleQuery>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_admin()?;

    state
        .services
        .roles
        .remove_role(subject_id, professor_id, query.role_type)
        .await?;
    Ok(Json(MessageResponse::new("Role removed")))
}
