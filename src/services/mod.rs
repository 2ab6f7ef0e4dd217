//! Business logic services

pub mod chat;
pub mod departments;
pub mod professors;
pub mod role_rules;
pub mod roles;
pub mod students;
pub mod subjects;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub departments: departments::DepartmentsService,
    pub professors: professors::ProfessorsService,
    pub students: students::StudentsService,
    pub subjects: subjects::SubjectsService,
    pub roles: roles::RolesService,
    pub chat: chat::ChatService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let role_store = Arc::new(repository.roles.clone());
        Self::with_role_store(repository, role_store)
    }

    /// Same as [`Services::new`] with a custom role store
    pub fn with_role_store(repository: Repository, role_store: Arc<dyn roles::RoleStore>) -> Self {
        Self {
            departments: departments::DepartmentsService::new(repository.clone()),
            professors: professors::ProfessorsService::new(repository.clone()),
            students: students::StudentsService::new(repository.clone()),
            subjects: subjects::SubjectsService::new(repository.clone()),
            roles: roles::RolesService::new(role_store),
            chat: chat::ChatService::new(repository.clone()),
            repository,
        }
    }
}
