//! Subjects repository for database operations

use chrono::Utc;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::SubjectStatus,
        professor_role::RoleHolder,
        student::Student,
        subject::{CreateSubject, Subject, SubjectQuery, UpdateSubject},
    },
};

/// Role holder tagged with its subject, for batched role maps
#[derive(Debug, Clone, FromRow)]
pub struct SubjectRoleHolder {
    pub subject_id: i32,
    #[sqlx(flatten)]
    pub holder: RoleHolder,
}

#[derive(Clone)]
pub struct SubjectsRepository {
    pool: Pool<Postgres>,
}

impl SubjectsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &SubjectQuery) -> AppResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, Subject>(
            r#"
            SELECT * FROM subjects
            WHERE ($1::int IS NULL OR department_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query.department_id)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))
    }

    /// Role holders of several subjects in one query
    pub async fn role_holders(&self, subject_ids: &[i32]) -> AppResult<Vec<SubjectRoleHolder>> {
        let rows = sqlx::query_as::<_, SubjectRoleHolder>(
            r#"
            SELECT r.subject_id, r.role_type, p.id, p.name, p.surname
            FROM professor_roles r
            JOIN professors p ON p.id = r.professor_id
            WHERE r.subject_id = ANY($1)
            ORDER BY r.created_at, r.id
            "#,
        )
        .bind(subject_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Students linked to any of the given ids
    pub async fn students(&self, student_ids: &[i32]) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = ANY($1)")
            .bind(student_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &CreateSubject) -> AppResult<Subject> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (title, description, technologies, department_id, student_id,
                                  status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.technologies)
        .bind(data.department_id)
        .bind(data.student_id)
        .bind(SubjectStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace the subject fields; the status is kept when not supplied
    pub async fn update(&self, id: i32, data: &UpdateSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            r#"
            UPDATE subjects
            SET title = $1, description = $2, technologies = $3, department_id = $4,
                student_id = $5, status = COALESCE($6, status), updated_at = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.technologies)
        .bind(data.department_id)
        .bind(data.student_id)
        .bind(data.status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))
    }

    pub async fn update_status(&self, id: i32, status: SubjectStatus) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "UPDATE subjects SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))
    }

    /// Delete a subject together with its roles
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM professor_roles WHERE subject_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Subject {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
