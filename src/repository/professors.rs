//! Professors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::professor::{CreateProfessor, Professor, UpdateProfessor},
};

#[derive(Clone)]
pub struct ProfessorsRepository {
    pool: Pool<Postgres>,
}

impl ProfessorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List professors, optionally restricted to one department
    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<Professor>> {
        let rows = sqlx::query_as::<_, Professor>(
            r#"
            SELECT * FROM professors
            WHERE ($1::int IS NULL OR department_id = $1)
            ORDER BY name, surname
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Professor> {
        sqlx::query_as::<_, Professor>("SELECT * FROM professors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Professor {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM professors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM professors
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

    pub async fn create(&self, data: &CreateProfessor) -> AppResult<Professor> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Professor>(
            r#"
            INSERT INTO professors (name, surname, email, phone, specialty, employment_type,
                                    department_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.specialty)
        .bind(data.employment_type)
        .bind(data.department_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update only the supplied fields
    pub async fn update(&self, id: i32, data: &UpdateProfessor) -> AppResult<Professor> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.surname, "surname");
        add_field!(data.email, "email");
        add_field!(data.phone, "phone");
        add_field!(data.specialty, "specialty");
        add_field!(data.employment_type, "employment_type");
        add_field!(data.department_id, "department_id");

        let query = format!(
            "UPDATE professors SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Professor>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.surname);
        bind_field!(data.email);
        bind_field!(data.phone);
        bind_field!(data.specialty);
        bind_field!(data.employment_type);
        bind_field!(data.department_id);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Professor {} not found", id)))
    }

    /// Whether the professor supervises (`encadrant`) any subject
    pub async fn holds_supervisor_role(&self, id: i32) -> AppResult<bool> {
        let holds: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM professor_roles WHERE professor_id = $1 AND role_type = 'encadrant')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(holds)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM professors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Professor {} not found", id)));
        }
        Ok(())
    }
}
