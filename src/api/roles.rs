//! Jury role endpoints of a subject

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::professor_role::{AssignRolesRequest, RemoveRoleQuery, RoleMap, SubjectRoles},
};

use super::{AuthenticatedUser, MessageResponse};

/// Current holder of each role on a subject
#[utoipa::path(
    get,
    path = "/subjects/{id}/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Role map", body = RoleMap),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn get_subject_roles(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RoleMap>> {
    let roles = state.services.roles.list_roles(id).await?;
    Ok(Json(roles))
}

/// Replace every role of a subject in one step
///
/// The batch must contain exactly one encadrant, at most one holder per role
/// type, no repeated (professor, role) pair and no professor with more than
/// two roles. Nothing is changed when any rule fails.
#[utoipa::path(
    put,
    path = "/subjects/{id}/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    request_body = AssignRolesRequest,
    responses(
        (status = 200, description = "Roles replaced", body = SubjectRoles),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Duplicate assignment or role type taken"),
        (status = 422, description = "Missing encadrant, unknown professor or too many roles"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn assign_subject_roles(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignRolesRequest>,
) -> AppResult<Json<SubjectRoles>> {
    claims.require_admin()?;

    let roles = state.services.roles.assign_roles(id, request.roles).await?;
    Ok(Json(roles))
}

/// Remove a role of a professor on a subject
#[utoipa::path(
    delete,
    path = "/subjects/{id}/roles/{professor_id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Subject ID"),
        ("professor_id" = i32, Path, description = "Professor ID"),
        RemoveRoleQuery
    ),
    responses(
        (status = 200, description = "Role removed", body = MessageResponse),
        (status = 404, description = "Subject or role not found"),
        (status = 422, description = "Subject would lose its last encadrant")
    )
)]
pub async fn remove_subject_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, professor_id)): Path<(i32, i32)>,
    Query(query): Query<RemoveRoleQuery>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_admin()?;

    state.services.roles.remove_role(id, professor_id, query.role_type).await?;
    Ok(Json(MessageResponse::new("Role removed")))
}
