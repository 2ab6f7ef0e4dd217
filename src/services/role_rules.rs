//! Rules of the professor role assignment engine.
//!
//! Everything here is pure: given the role set currently stored for a
//! subject and a requested change, [`plan`] either rejects the change or
//! returns the exact mutation to run inside the subject's transaction.
//!
//! Invariants kept for every subject with at least one role:
//! - exactly one `encadrant`, at most one `president`, at most one `rapporteur`;
//! - a professor holds at most [`MAX_ROLES_PER_PROFESSOR`] roles, never the
//!   same role type twice.

use std::collections::{HashMap, HashSet};

use crate::{
    error::RoleError,
    models::{enums::RoleType, professor_role::{ProfessorRole, RoleAssignment}},
};

pub const MAX_ROLES_PER_PROFESSOR: usize = 2;

/// Change requested on a subject's role set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleChange {
    /// Replace the whole role set
    Replace(Vec<RoleAssignment>),
    /// Add one role to the stored set
    Add(RoleAssignment),
    /// Remove one role of a professor, narrowed by type when given
    Remove {
        professor_id: i32,
        role_type: Option<RoleType>,
    },
}

/// Mutation accepted by the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolePlan {
    /// Delete every role of the subject, then insert these in order
    Replace(Vec<RoleAssignment>),
    Insert(RoleAssignment),
    /// Delete the role row with this id
    Delete(i32),
}

/// Decide how `change` applies to `current`
pub fn plan(current: &[ProfessorRole], change: &RoleChange) -> Result<RolePlan, RoleError> {
    match change {
        RoleChange::Replace(batch) => {
            validate_batch(batch)?;
            Ok(RolePlan::Replace(batch.clone()))
        }
        RoleChange::Add(assignment) => {
            check_addition(current, *assignment)?;
            Ok(RolePlan::Insert(*assignment))
        }
        RoleChange::Remove { professor_id, role_type } => {
            select_removal(current, *professor_id, *role_type).map(RolePlan::Delete)
        }
    }
}

/// Validate a complete replacement role set.
///
/// Checks run in a fixed order so a batch breaking several rules always
/// reports the same error: supervisor presence, per-professor cap, duplicate
/// pairs, then one holder per role type.
pub fn validate_batch(batch: &[RoleAssignment]) -> Result<(), RoleError> {
    if !batch.iter().any(|a| a.role_type == RoleType::Encadrant) {
        return Err(RoleError::MissingSupervisor);
    }

    let mut per_professor: HashMap<i32, usize> = HashMap::new();
    for assignment in batch {
        let count = per_professor.entry(assignment.professor_id).or_insert(0);
        *count += 1;
        if *count > MAX_ROLES_PER_PROFESSOR {
            return Err(RoleError::TooManyRolesForProfessor(assignment.professor_id));
        }
    }

    let mut seen = HashSet::new();
    for assignment in batch {
        if !seen.insert(*assignment) {
            return Err(RoleError::DuplicateRoleAssignment {
                professor_id: assignment.professor_id,
                role_type: assignment.role_type,
            });
        }
    }

    // Pairs are unique at this point, so a repeated type means two professors
    let mut holders = HashSet::new();
    for assignment in batch {
        if !holders.insert(assignment.role_type) {
            return Err(RoleError::RoleTypeTaken(assignment.role_type));
        }
    }

    Ok(())
}

/// Validate adding one role to the stored set
pub fn check_addition(current: &[ProfessorRole], assignment: RoleAssignment) -> Result<(), RoleError> {
    let RoleAssignment { professor_id, role_type } = assignment;

    if current
        .iter()
        .any(|r| r.professor_id == professor_id && r.role_type == role_type)
    {
        return Err(RoleError::RoleAlreadyAssigned { professor_id, role_type });
    }

    if current.iter().any(|r| r.role_type == role_type) {
        return Err(RoleError::RoleTypeTaken(role_type));
    }

    let held = current.iter().filter(|r| r.professor_id == professor_id).count();
    if held >= MAX_ROLES_PER_PROFESSOR {
        return Err(RoleError::TooManyRolesForProfessor(professor_id));
    }

    // The first role of a subject has to be its supervisor
    if role_type != RoleType::Encadrant && !has_supervisor(current) {
        return Err(RoleError::MissingSupervisor);
    }

    Ok(())
}

/// Pick the role row to delete and check the supervisor stays covered.
///
/// Without a role type, the professor's earliest role is selected.
pub fn select_removal(
    current: &[ProfessorRole],
    professor_id: i32,
    role_type: Option<RoleType>,
) -> Result<i32, RoleError> {
    let target = current
        .iter()
        .filter(|r| r.professor_id == professor_id)
        .filter(|r| role_type.map_or(true, |t| r.role_type == t))
        .min_by_key(|r| (r.created_at, r.id))
        .ok_or(RoleError::RoleNotFound(professor_id))?;

    if target.role_type == RoleType::Encadrant
        && !current
            .iter()
            .any(|r| r.id != target.id && r.role_type == RoleType::Encadrant)
    {
        return Err(RoleError::SupervisorRequired);
    }

    Ok(target.id)
}

fn has_supervisor(roles: &[ProfessorRole]) -> bool {
    roles.iter().any(|r| r.role_type == RoleType::Encadrant)
}
