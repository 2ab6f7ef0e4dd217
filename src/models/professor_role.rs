//! Professor roles on subjects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{enums::RoleType, professor::ProfessorShort};

/// One stored (subject, professor, role_type) row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfessorRole {
    pub id: i32,
    pub subject_id: i32,
    pub professor_id: i32,
    pub role_type: RoleType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfessorRole {
    pub fn assignment(&self) -> RoleAssignment {
        RoleAssignment {
            professor_id: self.professor_id,
            role_type: self.role_type,
        }
    }
}

/// Requested (professor, role_type) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct RoleAssignment {
    pub professor_id: i32,
    pub role_type: RoleType,
}

/// Full replacement of a subject's role set
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRolesRequest {
    pub roles: Vec<RoleAssignment>,
}

/// Role set of a subject after a replacement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubjectRoles {
    pub subject_id: i32,
    pub roles: Vec<ProfessorRole>,
}

/// Add one role for the professor in the path
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignSingleRoleRequest {
    pub role_type: RoleType,
}

/// Optional role type narrowing a removal
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RemoveRoleQuery {
    pub role_type: Option<RoleType>,
}

/// Professor holding a role, joined with its identity
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoleHolder {
    pub role_type: RoleType,
    pub id: i32,
    pub name: String,
    pub surname: String,
}

/// Role-keyed view of a subject's roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleMap {
    pub encadrant: Option<ProfessorShort>,
    pub president: Option<ProfessorShort>,
    pub rapporteur: Option<ProfessorShort>,
}

impl RoleMap {
    pub fn from_holders(holders: impl IntoIterator<Item = RoleHolder>) -> Self {
        let mut map = RoleMap::default();
        for holder in holders {
            let professor = ProfessorShort {
                id: holder.id,
                name: holder.name,
                surname: holder.surname,
            };
            match holder.role_type {
                RoleType::Encadrant => map.encadrant = Some(professor),
                RoleType::President => map.president = Some(professor),
                RoleType::Rapporteur => map.rapporteur = Some(professor),
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_map_from_holders() {
        let map = RoleMap::from_holders(vec![
            RoleHolder {
                role_type: RoleType::Encadrant,
                id: 1,
                name: "Alaoui".into(),
                surname: "Karim".into(),
            },
            RoleHolder {
                role_type: RoleType::Rapporteur,
                id: 2,
                name: "Bennani".into(),
                surname: "Sara".into(),
            },
        ]);

        assert_eq!(map.encadrant.as_ref().map(|p| p.id), Some(1));
        assert!(map.president.is_none());
        assert_eq!(map.rapporteur.as_ref().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_empty_role_map_serializes_nulls() {
        let json = serde_json::to_value(RoleMap::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"encadrant": null, "president": null, "rapporteur": null})
        );
    }
}
