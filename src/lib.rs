//! PFE Management Server
//!
//! REST JSON API for managing final-year projects: departments, professors,
//! students, subjects, the jury roles professors hold on each subject, and
//! the chat between supervisors and students.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Departments
        .route("/departments", get(api::departments::list_departments))
        .route("/departments", post(api::departments::create_department))
        .route("/departments/:id", get(api::departments::get_department))
        .route("/departments/:id", put(api::departments::update_department))
        .route("/departments/:id", delete(api::departments::delete_department))
        // Professors
        .route("/professors", get(api::professors::list_professors))
        .route("/professors", post(api::professors::create_professor))
        .route("/professors/available-students", get(api::professors::list_available_students))
        .route("/professors/:id", get(api::professors::get_professor))
        .route("/professors/:id", put(api::professors::update_professor))
        .route("/professors/:id", delete(api::professors::delete_professor))
        .route("/professors/:id/students", get(api::professors::list_supervised_students))
        .route("/professors/:id/students", post(api::professors::add_supervised_student))
        .route("/professors/:id/students/:student_id", delete(api::professors::remove_supervised_student))
        .route(
            "/professors/:id/subjects/:subject_id/roles",
            post(api::professors::assign_professor_role).delete(api::professors::remove_professor_role),
        )
        // Students
        .route("/students", get(api::students::list_students))
        .route("/students", post(api::students::create_student))
        .route("/students/by-email", get(api::students::find_student_by_email))
        .route("/students/:id", get(api::students::get_student))
        .route("/students/:id", put(api::students::update_student))
        .route("/students/:id", delete(api::students::delete_student))
        .route("/students/:id/supervisor", get(api::students::get_student_supervisor))
        // Subjects
        .route("/subjects", get(api::subjects::list_subjects))
        .route("/subjects", post(api::subjects::create_subject))
        .route("/subjects/approved", get(api::subjects::list_approved_subjects))
        .route("/subjects/:id", get(api::subjects::get_subject))
        .route("/subjects/:id", put(api::subjects::update_subject))
        .route("/subjects/:id", delete(api::subjects::delete_subject))
        .route(
            "/subjects/:id/status",
            put(api::subjects::update_subject_status).post(api::subjects::update_subject_status),
        )
        // Roles
        .route(
            "/subjects/:id/roles",
            get(api::roles::get_subject_roles)
                .put(api::roles::assign_subject_roles)
                .post(api::roles::assign_subject_roles),
        )
        .route("/subjects/:id/roles/:professor_id", delete(api::roles::remove_subject_role))
        // Chat
        .route("/chat/send", post(api::chat::send_message))
        .route("/chat/mark-read/:id", put(api::chat::mark_message_read))
        .route("/chat/unread/:professor_id", get(api::chat::get_unread_count))
        .route("/chat/:professor_id/:student_id", get(api::chat::get_conversation))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
