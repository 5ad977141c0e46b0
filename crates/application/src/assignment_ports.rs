mod audit;
mod directory;
mod store;

pub use audit::{AuditEvent, AuditRepository};
pub use directory::{DirectoryUser, UserDirectory};
pub use store::{MembershipField, RoleAssignmentStore};
