//! Students repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{Student, StudentInput},
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE ($1::int IS NULL OR department_id = $1)
            ORDER BY name, surname
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM students
                WHERE LOWER(email) = LOWER($1) AND ($2::int IS NULL OR id != $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &StudentInput) -> AppResult<Student> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, surname, email, internship_type, department_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.email)
        .bind(data.internship_type)
        .bind(data.department_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &StudentInput) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $1, surname = $2, email = $3, internship_type = $4,
                department_id = $5, updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.email)
        .bind(data.internship_type)
        .bind(data.department_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Student {} not found", id)));
        }
        Ok(())
    }

    /// Students supervised by a professor
    pub async fn list_by_supervisor(&self, professor_id: i32) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE supervisor_id = $1 ORDER BY name, surname",
        )
        .bind(professor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Students without a supervisor
    pub async fn list_unsupervised(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE supervisor_id IS NULL ORDER BY name, surname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Set the supervisor of a student that has none; `None` when the
    /// student already has one
    pub async fn attach_supervisor(&self, student_id: i32, professor_id: i32) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET supervisor_id = $1, updated_at = $2
            WHERE id = $3 AND supervisor_id IS NULL
            RETURNING *
            "#,
        )
        .bind(professor_id)
        .bind(Utc::now())
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Clear the supervisor of a student if it is `professor_id`
    pub async fn detach_supervisor(&self, student_id: i32, professor_id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE students SET supervisor_id = NULL, updated_at = $1
            WHERE id = $2 AND supervisor_id = $3
            "#,
        )
        .bind(Utc::now())
        .bind(student_id)
        .bind(professor_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
