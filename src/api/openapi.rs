//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{chat, departments, health, professors, roles, students, subjects};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PFE Management API",
        version = "0.3.0",
        description = "Final-year project management REST API: departments, professors, students, subjects and jury roles",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Departments
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        // Professors
        professors::list_professors,
        professors::get_professor,
        professors::create_professor,
        professors::update_professor,
        professors::delete_professor,
        professors::list_supervised_students,
        professors::list_available_students,
        professors::add_supervised_student,
        professors::remove_supervised_student,
        professors::assign_professor_role,
        professors::remove_professor_role,
        // Students
        students::list_students,
        students::find_student_by_email,
        students::get_student,
        students::get_student_supervisor,
        students::create_student,
        students::update_student,
        students::delete_student,
        // Subjects
        subjects::list_subjects,
        subjects::list_approved_subjects,
        subjects::get_subject,
        subjects::create_subject,
        subjects::update_subject,
        subjects::update_subject_status,
        subjects::delete_subject,
        // Roles
        roles::get_subject_roles,
        roles::assign_subject_roles,
        roles::remove_subject_role,
        // Chat
        chat::get_conversation,
        chat::send_message,
        chat::mark_message_read,
        chat::get_unread_count,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::RoleType,
            crate::models::enums::EmploymentType,
            crate::models::enums::InternshipType,
            crate::models::enums::SubjectStatus,
            crate::models::enums::SenderType,
            // Departments
            crate::models::department::Department,
            crate::models::department::DepartmentSummary,
            crate::models::department::DepartmentDetails,
            crate::models::department::DepartmentInput,
            // Professors
            crate::models::professor::Professor,
            crate::models::professor::ProfessorShort,
            crate::models::professor::CreateProfessor,
            crate::models::professor::UpdateProfessor,
            crate::models::professor::AddStudentRequest,
            // Students
            crate::models::student::Student,
            crate::models::student::StudentInput,
            // Subjects
            crate::models::subject::Subject,
            crate::models::subject::SubjectDetails,
            crate::models::subject::CreateSubject,
            crate::models::subject::UpdateSubject,
            crate::models::subject::UpdateSubjectStatus,
            // Roles
            crate::models::professor_role::ProfessorRole,
            crate::models::professor_role::RoleAssignment,
            crate::models::professor_role::AssignRolesRequest,
            crate::models::professor_role::AssignSingleRoleRequest,
            crate::models::professor_role::SubjectRoles,
            crate::models::professor_role::RoleMap,
            // Chat
            crate::models::chat_message::ChatMessage,
            crate::models::chat_message::SendMessage,
            crate::models::chat_message::UnreadCount,
            // Health
            health::HealthResponse,
            // Common
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "departments", description = "Department management"),
        (name = "professors", description = "Professor management and supervision"),
        (name = "students", description = "Student management"),
        (name = "subjects", description = "Subject management and review"),
        (name = "roles", description = "Jury roles on subjects"),
        (name = "chat", description = "Professor and student messaging")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_role_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/subjects/{id}/roles"));
        assert!(doc.paths.paths.contains_key("/subjects/{id}/roles/{professor_id}"));
        assert!(doc.paths.paths.contains_key("/professors/{id}/subjects/{subject_id}/roles"));
    }
}
