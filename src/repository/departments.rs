//! Departments repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::department::{Department, DepartmentInput, DepartmentSummary},
};

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: Pool<Postgres>,
}

impl DepartmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List departments with their professor counts
    pub async fn list(&self) -> AppResult<Vec<DepartmentSummary>> {
        let rows = sqlx::query_as::<_, DepartmentSummary>(
            r#"
            SELECT d.*,
                   (SELECT COUNT(*) FROM professors p WHERE p.department_id = d.id) AS professors_count
            FROM departments d
            ORDER BY d.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check name or code uniqueness, ignoring `exclude_id`
    pub async fn name_or_code_taken(&self, name: &str, code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM departments
                WHERE (LOWER(name) = LOWER($1) OR code = $2)
                  AND ($3::int IS NULL OR id != $3)
            )
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    pub async fn create(&self, data: &DepartmentInput) -> AppResult<Department> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, code, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.normalized_code())
        .bind(&data.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &DepartmentInput) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = $1, code = $2, description = $3, updated_at = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.normalized_code())
        .bind(&data.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Number of professors, students and subjects still attached
    pub async fn count_dependents(&self, id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM professors WHERE department_id = $1)
                 + (SELECT COUNT(*) FROM students WHERE department_id = $1)
                 + (SELECT COUNT(*) FROM subjects WHERE department_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Department {} not found", id)));
        }
        Ok(())
    }
}
