//! Professor roles repository (Postgres implementation of the role store)

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::RoleError,
    models::professor_role::{ProfessorRole, RoleAssignment, RoleHolder},
    services::roles::{RoleStore, RoleTransaction},
};

#[derive(Clone)]
pub struct RolesRepository {
    pool: Pool<Postgres>,
}

impl RolesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RolesRepository {
    async fn subject_exists(&self, subject_id: i32) -> Result<bool, RoleError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1)")
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn professor_exists(&self, professor_id: i32) -> Result<bool, RoleError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM professors WHERE id = $1)")
            .bind(professor_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_roles(&self, subject_id: i32) -> Result<Vec<ProfessorRole>, RoleError> {
        let roles = sqlx::query_as::<_, ProfessorRole>(
            "SELECT * FROM professor_roles WHERE subject_id = $1 ORDER BY created_at, id",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn role_holders(&self, subject_id: i32) -> Result<Vec<RoleHolder>, RoleError> {
        let holders = sqlx::query_as::<_, RoleHolder>(
            r#"
            SELECT r.role_type, p.id, p.name, p.surname
            FROM professor_roles r
            JOIN professors p ON p.id = r.professor_id
            WHERE r.subject_id = $1
            ORDER BY r.created_at, r.id
            "#,
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(holders)
    }

    async fn begin(&self, subject_id: i32) -> Result<Box<dyn RoleTransaction>, RoleError> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the subject serializes every role change of that subject
        let locked: Option<i32> =
            sqlx::query_scalar("SELECT id FROM subjects WHERE id = $1 FOR UPDATE")
                .bind(subject_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Err(RoleError::NotFound(subject_id));
        }

        Ok(Box::new(PgRoleTransaction { tx, subject_id }))
    }
}

/// Open transaction holding the subject row lock
pub struct PgRoleTransaction {
    tx: Transaction<'static, Postgres>,
    subject_id: i32,
}

#[async_trait]
impl RoleTransaction for PgRoleTransaction {
    async fn list_roles(&mut self) -> Result<Vec<ProfessorRole>, RoleError> {
        let roles = sqlx::query_as::<_, ProfessorRole>(
            "SELECT * FROM professor_roles WHERE subject_id = $1 ORDER BY created_at, id",
        )
        .bind(self.subject_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(roles)
    }

    async fn delete_all(&mut self) -> Result<u64, RoleError> {
        let result = sqlx::query("DELETE FROM professor_roles WHERE subject_id = $1")
            .bind(self.subject_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_role(&mut self, role_id: i32) -> Result<(), RoleError> {
        let result = sqlx::query("DELETE FROM professor_roles WHERE id = $1 AND subject_id = $2")
            .bind(role_id)
            .bind(self.subject_id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RoleError::StorageUnavailable(format!(
                "Role {} vanished during removal",
                role_id
            )));
        }
        Ok(())
    }

    async fn insert_role(&mut self, assignment: RoleAssignment) -> Result<ProfessorRole, RoleError> {
        let now = Utc::now();
        sqlx::query_as::<_, ProfessorRole>(
            r#"
            INSERT INTO professor_roles (subject_id, professor_id, role_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(self.subject_id)
        .bind(assignment.professor_id)
        .bind(assignment.role_type)
        .bind(now)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| insert_error(e, assignment))
    }

    async fn commit(self: Box<Self>) -> Result<(), RoleError> {
        let this = *self;
        this.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RoleError> {
        let this = *self;
        this.tx.rollback().await?;
        Ok(())
    }
}

/// Constraint violations on insert keep their own meaning
fn insert_error(e: sqlx::Error, assignment: RoleAssignment) -> RoleError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return RoleError::DuplicateRoleAssignment {
                professor_id: assignment.professor_id,
                role_type: assignment.role_type,
            };
        }
        if db.is_foreign_key_violation() {
            return RoleError::InvalidReference(assignment.professor_id);
        }
    }
    e.into()
}
