//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_role_assignment_store;
mod json_catalog_loader;
mod postgres_audit_repository;
mod postgres_role_assignment_store;
mod postgres_user_directory;

pub use in_memory_role_assignment_store::InMemoryRoleAssignmentStore;
pub use json_catalog_loader::{load_catalog_from_path, parse_catalog_json};
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_role_assignment_store::PostgresRoleAssignmentStore;
pub use postgres_user_directory::PostgresUserDirectory;
