//! Data models for the PFE server

pub mod chat_message;
pub mod department;
pub mod enums;
pub mod professor;
pub mod professor_role;
pub mod student;
pub mod subject;
pub mod user;

// Re-export commonly used types
pub use chat_message::ChatMessage;
pub use department::Department;
pub use enums::{EmploymentType, InternshipType, RoleType, SenderType, SubjectStatus};
pub use professor::{Professor, ProfessorShort};
pub use professor_role::{ProfessorRole, RoleAssignment, RoleMap};
pub use student::Student;
pub use subject::Subject;
pub use user::{UserClaims, UserRole};
