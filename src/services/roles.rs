//! Professor role assignment service

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::RoleError,
    models::{
        enums::RoleType,
        professor_role::{ProfessorRole, RoleAssignment, RoleHolder, RoleMap, SubjectRoles},
    },
    services::role_rules::{self, RoleChange, RolePlan},
};

/// Storage used by the role engine.
///
/// `begin` must hold the subject exclusively until the returned transaction
/// commits or rolls back, so that two changes on one subject never interleave.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn subject_exists(&self, subject_id: i32) -> Result<bool, RoleError>;

    async fn professor_exists(&self, professor_id: i32) -> Result<bool, RoleError>;

    /// Committed roles of a subject, oldest first
    async fn list_roles(&self, subject_id: i32) -> Result<Vec<ProfessorRole>, RoleError>;

    async fn role_holders(&self, subject_id: i32) -> Result<Vec<RoleHolder>, RoleError>;

    /// Open a transaction scoped to one subject; fails with `NotFound` when
    /// the subject does not exist.
    async fn begin(&self, subject_id: i32) -> Result<Box<dyn RoleTransaction>, RoleError>;
}

/// Write scope over one subject's role rows
#[async_trait]
pub trait RoleTransaction: Send {
    async fn list_roles(&mut self) -> Result<Vec<ProfessorRole>, RoleError>;

    async fn delete_all(&mut self) -> Result<u64, RoleError>;

    async fn delete_role(&mut self, role_id: i32) -> Result<(), RoleError>;

    async fn insert_role(&mut self, assignment: RoleAssignment) -> Result<ProfessorRole, RoleError>;

    async fn commit(self: Box<Self>) -> Result<(), RoleError>;

    async fn rollback(self: Box<Self>) -> Result<(), RoleError>;
}

#[derive(Clone)]
pub struct RolesService {
    store: Arc<dyn RoleStore>,
}

impl RolesService {
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    /// Role map of a subject (`encadrant`, `president`, `rapporteur`)
    pub async fn list_roles(&self, subject_id: i32) -> Result<RoleMap, RoleError> {
        self.ensure_subject(subject_id).await?;
        let holders = self.store.role_holders(subject_id).await?;
        Ok(RoleMap::from_holders(holders))
    }

    /// Stored role rows of a subject
    pub async fn stored_roles(&self, subject_id: i32) -> Result<Vec<ProfessorRole>, RoleError> {
        self.ensure_subject(subject_id).await?;
        self.store.list_roles(subject_id).await
    }

    /// Replace the whole role set of a subject, or leave it untouched
    pub async fn assign_roles(
        &self,
        subject_id: i32,
        roles: Vec<RoleAssignment>,
    ) -> Result<SubjectRoles, RoleError> {
        self.ensure_subject(subject_id).await?;
        self.ensure_professors(roles.iter().map(|r| r.professor_id)).await?;

        if let Err(e) = role_rules::validate_batch(&roles) {
            tracing::debug!(subject_id, error = %e, "Rejected role batch");
            return Err(e);
        }

        let roles = self.apply(subject_id, RoleChange::Replace(roles)).await?;
        tracing::info!(subject_id, count = roles.len(), "Replaced subject roles");

        Ok(SubjectRoles { subject_id, roles })
    }

    /// Add one role to a subject's stored role set
    pub async fn assign_single_role(
        &self,
        subject_id: i32,
        professor_id: i32,
        role_type: RoleType,
    ) -> Result<ProfessorRole, RoleError> {
        self.ensure_subject(subject_id).await?;
        self.ensure_professors([professor_id]).await?;

        let assignment = RoleAssignment { professor_id, role_type };
        let role = self
            .apply(subject_id, RoleChange::Add(assignment))
            .await?
            .pop()
            .ok_or_else(|| RoleError::StorageUnavailable("Inserted role was not returned".to_string()))?;

        tracing::info!(subject_id, professor_id, %role_type, "Assigned role");
        Ok(role)
    }

    /// Remove one role of a professor on a subject
    pub async fn remove_role(
        &self,
        subject_id: i32,
        professor_id: i32,
        role_type: Option<RoleType>,
    ) -> Result<(), RoleError> {
        self.ensure_subject(subject_id).await?;
        self.apply(subject_id, RoleChange::Remove { professor_id, role_type })
            .await?;

        tracing::info!(subject_id, professor_id, ?role_type, "Removed role");
        Ok(())
    }

    async fn ensure_subject(&self, subject_id: i32) -> Result<(), RoleError> {
        if self.store.subject_exists(subject_id).await? {
            Ok(())
        } else {
            Err(RoleError::NotFound(subject_id))
        }
    }

    async fn ensure_professors(&self, ids: impl IntoIterator<Item = i32>) -> Result<(), RoleError> {
        let ids: BTreeSet<i32> = ids.into_iter().collect();
        for id in ids {
            if !self.store.professor_exists(id).await? {
                return Err(RoleError::InvalidReference(id));
            }
        }
        Ok(())
    }

    /// Run `change` in the subject's transaction; returns the inserted rows
    async fn apply(&self, subject_id: i32, change: RoleChange) -> Result<Vec<ProfessorRole>, RoleError> {
        let mut tx = self.store.begin(subject_id).await?;

        match Self::execute(tx.as_mut(), &change).await {
            Ok(inserted) => {
                tx.commit().await?;
                Ok(inserted)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(subject_id, error = %rollback_err, "Role transaction rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn execute(
        tx: &mut dyn RoleTransaction,
        change: &RoleChange,
    ) -> Result<Vec<ProfessorRole>, RoleError> {
        let current = tx.list_roles().await?;

        match role_rules::plan(&current, change)? {
            RolePlan::Replace(batch) => {
                tx.delete_all().await?;
                let mut inserted = Vec::with_capacity(batch.len());
                for assignment in batch {
                    inserted.push(tx.insert_role(assignment).await?);
                }
                Ok(inserted)
            }
            RolePlan::Insert(assignment) => Ok(vec![tx.insert_role(assignment).await?]),
            RolePlan::Delete(role_id) => {
                tx.delete_role(role_id).await?;
                Ok(Vec::new())
            }
        }
    }
}
