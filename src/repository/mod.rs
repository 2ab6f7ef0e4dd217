//! Repository layer for database operations

pub mod chat;
pub mod departments;
pub mod professors;
pub mod roles;
pub mod students;
pub mod subjects;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub departments: departments::DepartmentsRepository,
    pub professors: professors::ProfessorsRepository,
    pub students: students::StudentsRepository,
    pub subjects: subjects::SubjectsRepository,
    pub roles: roles::RolesRepository,
    pub chat: chat::ChatRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            departments: departments::DepartmentsRepository::new(pool.clone()),
            professors: professors::ProfessorsRepository::new(pool.clone()),
            students: students::StudentsRepository::new(pool.clone()),
            subjects: subjects::SubjectsRepository::new(pool.clone()),
            roles: roles::RolesRepository::new(pool.clone()),
            chat: chat::ChatRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
