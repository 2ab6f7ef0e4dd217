//! Professor directory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        professor::{CreateProfessor, Professor, UpdateProfessor},
        student::Student,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ProfessorsService {
    repository: Repository,
}

impl ProfessorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<Professor>> {
        self.repository.professors.list(department_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Professor> {
        self.repository.professors.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateProfessor) -> AppResult<Professor> {
        data.validate()?;
        self.ensure_department(data.department_id).await?;

        if self.repository.professors.email_exists(&data.email, None).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let professor = self.repository.professors.create(data).await?;
        tracing::info!(id = professor.id, "Professor created");
        Ok(professor)
    }

    pub async fn update(&self, id: i32, data: &UpdateProfessor) -> AppResult<Professor> {
        data.validate()?;

        if let Some(department_id) = data.department_id {
            self.ensure_department(department_id).await?;
        }
        if let Some(ref email) = data.email {
            if self.repository.professors.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already in use".to_string()));
            }
        }

        self.repository.professors.update(id, data).await
    }

    /// Delete a professor; refused while it supervises a subject
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.professors.holds_supervisor_role(id).await? {
            return Err(AppError::BusinessRule(
                "Professor supervises subjects; reassign the encadrant role first".to_string(),
            ));
        }
        self.repository.professors.delete(id).await?;
        tracing::info!(id, "Professor deleted");
        Ok(())
    }

    /// Students directly supervised by the professor
    pub async fn students(&self, professor_id: i32) -> AppResult<Vec<Student>> {
        self.repository.professors.get_by_id(professor_id).await?;
        self.repository.students.list_by_supervisor(professor_id).await
    }

    pub async fn available_students(&self) -> AppResult<Vec<Student>> {
        self.repository.students.list_unsupervised().await
    }

    /// Make the professor the supervisor of a student without one
    pub async fn add_student(&self, professor_id: i32, student_id: i32) -> AppResult<Student> {
        self.repository.professors.get_by_id(professor_id).await?;
        self.repository.students.get_by_id(student_id).await?;

        self.repository
            .students
            .attach_supervisor(student_id, professor_id)
            .await?
            .ok_or_else(|| AppError::BusinessRule("Student already has a supervisor".to_string()))
    }

    pub async fn remove_student(&self, professor_id: i32, student_id: i32) -> AppResult<()> {
        let detached = self
            .repository
            .students
            .detach_supervisor(student_id, professor_id)
            .await?;
        if !detached {
            return Err(AppError::NotFound(format!(
                "Student {} is not supervised by professor {}",
                student_id, professor_id
            )));
        }
        Ok(())
    }

    async fn ensure_department(&self, department_id: i32) -> AppResult<()> {
        if self.repository.departments.exists(department_id).await? {
            Ok(())
        } else {
            Err(AppError::Validation(format!("Department {} does not exist", department_id)))
        }
    }
}
