//! Shared domain enums, stored as text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements `as_str`, `Display`, `FromStr` and the sqlx text mapping for a
/// fieldless enum whose variants map one-to-one onto database strings.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// RoleType
// ---------------------------------------------------------------------------

/// Role a professor holds on a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Supervisor, mandatory and unique per subject
    Encadrant,
    President,
    /// Reviewer
    Rapporteur,
}

text_enum!(RoleType {
    Encadrant => "encadrant",
    President => "president",
    Rapporteur => "rapporteur",
});

impl RoleType {
    pub const ALL: [RoleType; 3] = [RoleType::Encadrant, RoleType::President, RoleType::Rapporteur];
}

// ---------------------------------------------------------------------------
// EmploymentType
// ---------------------------------------------------------------------------

/// Professor employment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentType {
    Vacataire,
    Permanent,
}

text_enum!(EmploymentType {
    Vacataire => "vacataire",
    Permanent => "permanent",
});

impl Default for EmploymentType {
    fn default() -> Self {
        EmploymentType::Permanent
    }
}

// ---------------------------------------------------------------------------
// InternshipType
// ---------------------------------------------------------------------------

/// Student internship type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InternshipType {
    #[serde(rename = "PFE")]
    Pfe,
    #[serde(rename = "PPFA")]
    Ppfa,
}

text_enum!(InternshipType {
    Pfe => "PFE",
    Ppfa => "PPFA",
});

// ---------------------------------------------------------------------------
// SubjectStatus
// ---------------------------------------------------------------------------

/// Subject approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    Pending,
    Approved,
    Rejected,
}

text_enum!(SubjectStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

impl Default for SubjectStatus {
    fn default() -> Self {
        SubjectStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// SenderType
// ---------------------------------------------------------------------------

/// Author side of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Professor,
    Student,
}

text_enum!(SenderType {
    Professor => "professor",
    Student => "student",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_type_text() {
        assert_eq!(RoleType::Encadrant.as_str(), "encadrant");
        assert_eq!("rapporteur".parse::<RoleType>(), Ok(RoleType::Rapporteur));
        assert!("supervisor".parse::<RoleType>().is_err());
    }

    #[test]
    fn test_role_type_serde() {
        let json = serde_json::to_string(&RoleType::President).unwrap();
        assert_eq!(json, "\"president\"");
        let parsed: RoleType = serde_json::from_str("\"encadrant\"").unwrap();
        assert_eq!(parsed, RoleType::Encadrant);
    }

    #[test]
    fn test_internship_type_uppercase() {
        assert_eq!(InternshipType::Ppfa.to_string(), "PPFA");
        let parsed: InternshipType = serde_json::from_str("\"PFE\"").unwrap();
        assert_eq!(parsed, InternshipType::Pfe);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SubjectStatus::default(), SubjectStatus::Pending);
        assert_eq!(EmploymentType::default(), EmploymentType::Permanent);
    }
}
