//! Subject management service

use std::collections::HashMap;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::SubjectStatus,
        professor_role::{RoleHolder, RoleMap},
        student::Student,
        subject::{CreateSubject, Subject, SubjectDetails, SubjectQuery, UpdateSubject},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SubjectsService {
    repository: Repository,
}

impl SubjectsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Subjects with their student and role map
    pub async fn list(&self, query: &SubjectQuery) -> AppResult<Vec<SubjectDetails>> {
        let subjects = self.repository.subjects.list(query).await?;
        self.with_details(subjects).await
    }

    pub async fn list_approved(&self, department_id: Option<i32>) -> AppResult<Vec<SubjectDetails>> {
        self.list(&SubjectQuery {
            department_id,
            status: Some(SubjectStatus::Approved),
        })
        .await
    }

    pub async fn get(&self, id: i32) -> AppResult<SubjectDetails> {
        let subject = self.repository.subjects.get_by_id(id).await?;
        self.with_details(vec![subject])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))
    }

    pub async fn create(&self, data: &CreateSubject) -> AppResult<SubjectDetails> {
        data.validate()?;
        self.check_references(data.department_id, data.student_id).await?;

        let subject = self.repository.subjects.create(data).await?;
        tracing::info!(id = subject.id, "Subject created");
        self.get(subject.id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateSubject) -> AppResult<SubjectDetails> {
        data.validate()?;
        self.check_references(data.department_id, data.student_id).await?;

        self.repository.subjects.update(id, data).await?;
        self.get(id).await
    }

    /// Change the approval status only; roles are not inspected
    pub async fn update_status(&self, id: i32, status: SubjectStatus) -> AppResult<SubjectDetails> {
        self.repository.subjects.update_status(id, status).await?;
        tracing::info!(id, %status, "Subject status updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.subjects.delete(id).await?;
        tracing::info!(id, "Subject deleted");
        Ok(())
    }

    async fn check_references(&self, department_id: i32, student_id: Option<i32>) -> AppResult<()> {
        if !self.repository.departments.exists(department_id).await? {
            return Err(AppError::Validation(format!("Department {} does not exist", department_id)));
        }
        if let Some(student_id) = student_id {
            if !self.repository.students.exists(student_id).await? {
                return Err(AppError::Validation(format!("Student {} does not exist", student_id)));
            }
        }
        Ok(())
    }

    async fn with_details(&self, subjects: Vec<Subject>) -> AppResult<Vec<SubjectDetails>> {
        if subjects.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = subjects.iter().map(|s| s.id).collect();
        let student_ids: Vec<i32> = subjects.iter().filter_map(|s| s.student_id).collect();

        let mut holders: HashMap<i32, Vec<RoleHolder>> = HashMap::new();
        for row in self.repository.subjects.role_holders(&ids).await? {
            holders.entry(row.subject_id).or_default().push(row.holder);
        }

        let students: HashMap<i32, Student> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            self.repository
                .subjects
                .students(&student_ids)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };

        Ok(subjects
            .into_iter()
            .map(|subject| {
                let roles = RoleMap::from_holders(holders.remove(&subject.id).unwrap_or_default());
                let student = subject.student_id.and_then(|id| students.get(&id).cloned());
                SubjectDetails { subject, student, roles }
            })
            .collect())
    }
}
