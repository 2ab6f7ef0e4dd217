//! In-memory role store shared by the integration tests

#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        atomic::{AtomicI32, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;

use pfe_server::{
    error::RoleError,
    models::{
        enums::RoleType,
        professor_role::{ProfessorRole, RoleAssignment, RoleHolder},
    },
    services::roles::{RoleStore, RoleTransaction},
};

#[derive(Default)]
struct Committed {
    subjects: BTreeSet<i32>,
    professors: HashMap<i32, (String, String)>,
    roles: Vec<ProfessorRole>,
}

#[derive(Default)]
struct Faults {
    /// Inserts left before the next one fails
    insert_countdown: Mutex<Option<usize>>,
    fail_commit: Mutex<bool>,
}

/// Role store keeping committed rows in memory.
///
/// Transactions work on a private copy of the subject's rows, hold a
/// per-subject lock until they end, and publish the copy on commit.
#[derive(Default)]
pub struct MemoryRoleStore {
    committed: Arc<Mutex<Committed>>,
    subject_locks: Mutex<HashMap<i32, Arc<tokio::sync::Mutex<()>>>>,
    faults: Arc<Faults>,
    next_id: Arc<AtomicI32>,
    begun: AtomicUsize,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with subjects `subjects` and professors `professors`
    pub fn with_fixtures(subjects: &[i32], professors: &[i32]) -> Self {
        let store = Self::new();
        for &id in subjects {
            store.add_subject(id);
        }
        for &id in professors {
            store.add_professor(id, &format!("Prof{}", id), "Test");
        }
        store
    }

    pub fn add_subject(&self, id: i32) {
        self.committed.lock().unwrap().subjects.insert(id);
    }

    pub fn add_professor(&self, id: i32, name: &str, surname: &str) {
        self.committed
            .lock()
            .unwrap()
            .professors
            .insert(id, (name.to_string(), surname.to_string()));
    }

    /// Committed roles of a subject as sorted (professor, role) pairs
    pub fn assignments(&self, subject_id: i32) -> Vec<(i32, RoleType)> {
        let mut pairs: Vec<_> = self
            .committed
            .lock()
            .unwrap()
            .roles
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .map(|r| (r.professor_id, r.role_type))
            .collect();
        pairs.sort();
        pairs
    }

    /// Make the `n`-th insert from now (1-based) fail
    pub fn fail_insert(&self, n: usize) {
        *self.faults.insert_countdown.lock().unwrap() = Some(n);
    }

    pub fn fail_next_commit(&self) {
        *self.faults.fail_commit.lock().unwrap() = true;
    }

    /// Number of transactions opened so far
    pub fn transactions_begun(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }

    fn subject_lock(&self, subject_id: i32) -> Arc<tokio::sync::Mutex<()>> {
        self.subject_locks
            .lock()
            .unwrap()
            .entry(subject_id)
            .or_default()
            .clone()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn subject_exists(&self, subject_id: i32) -> Result<bool, RoleError> {
        Ok(self.committed.lock().unwrap().subjects.contains(&subject_id))
    }

    async fn professor_exists(&self, professor_id: i32) -> Result<bool, RoleError> {
        Ok(self.committed.lock().unwrap().professors.contains_key(&professor_id))
    }

    async fn list_roles(&self, subject_id: i32) -> Result<Vec<ProfessorRole>, RoleError> {
        let committed = self.committed.lock().unwrap();
        Ok(committed
            .roles
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect())
    }

    async fn role_holders(&self, subject_id: i32) -> Result<Vec<RoleHolder>, RoleError> {
        let committed = self.committed.lock().unwrap();
        Ok(committed
            .roles
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .filter_map(|r| {
                committed.professors.get(&r.professor_id).map(|(name, surname)| RoleHolder {
                    role_type: r.role_type,
                    id: r.professor_id,
                    name: name.clone(),
                    surname: surname.clone(),
                })
            })
            .collect())
    }

    async fn begin(&self, subject_id: i32) -> Result<Box<dyn RoleTransaction>, RoleError> {
        let guard = self.subject_lock(subject_id).lock_owned().await;
        self.begun.fetch_add(1, Ordering::SeqCst);

        let working = {
            let committed = self.committed.lock().unwrap();
            if !committed.subjects.contains(&subject_id) {
                return Err(RoleError::NotFound(subject_id));
            }
            committed
                .roles
                .iter()
                .filter(|r| r.subject_id == subject_id)
                .cloned()
                .collect()
        };

        Ok(Box::new(MemoryTransaction {
            subject_id,
            working,
            committed: self.committed.clone(),
            faults: self.faults.clone(),
            next_id: self.next_id.clone(),
            _guard: guard,
        }))
    }
}

struct MemoryTransaction {
    subject_id: i32,
    working: Vec<ProfessorRole>,
    committed: Arc<Mutex<Committed>>,
    faults: Arc<Faults>,
    next_id: Arc<AtomicI32>,
    _guard: OwnedMutexGuard<()>,
}

#[async_trait]
impl RoleTransaction for MemoryTransaction {
    async fn list_roles(&mut self) -> Result<Vec<ProfessorRole>, RoleError> {
        Ok(self.working.clone())
    }

    async fn delete_all(&mut self) -> Result<u64, RoleError> {
        let removed = self.working.len() as u64;
        self.working.clear();
        Ok(removed)
    }

    async fn delete_role(&mut self, role_id: i32) -> Result<(), RoleError> {
        let before = self.working.len();
        self.working.retain(|r| r.id != role_id);
        if self.working.len() == before {
            return Err(RoleError::StorageUnavailable(format!("role row {} vanished", role_id)));
        }
        Ok(())
    }

    async fn insert_role(&mut self, assignment: RoleAssignment) -> Result<ProfessorRole, RoleError> {
        // Let concurrent callers run between writes
        tokio::task::yield_now().await;

        {
            let mut countdown = self.faults.insert_countdown.lock().unwrap();
            if let Some(left) = countdown.as_mut() {
                *left -= 1;
                if *left == 0 {
                    *countdown = None;
                    return Err(RoleError::StorageUnavailable("injected insert failure".to_string()));
                }
            }
        }

        if !self.committed.lock().unwrap().professors.contains_key(&assignment.professor_id) {
            return Err(RoleError::InvalidReference(assignment.professor_id));
        }
        if self.working.iter().any(|r| r.assignment() == assignment) {
            return Err(RoleError::DuplicateRoleAssignment {
                professor_id: assignment.professor_id,
                role_type: assignment.role_type,
            });
        }

        let now = Utc::now();
        let role = ProfessorRole {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            subject_id: self.subject_id,
            professor_id: assignment.professor_id,
            role_type: assignment.role_type,
            created_at: now,
            updated_at: now,
        };
        self.working.push(role.clone());
        Ok(role)
    }

    async fn commit(self: Box<Self>) -> Result<(), RoleError> {
        {
            let mut fail = self.faults.fail_commit.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(RoleError::StorageUnavailable("injected commit failure".to_string()));
            }
        }

        let this = *self;
        let mut committed = this.committed.lock().unwrap();
        committed.roles.retain(|r| r.subject_id != this.subject_id);
        committed.roles.extend(this.working);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RoleError> {
        Ok(())
    }
}
