//! Application services and ports.

#![forbid(unsafe_code)]

mod actor;
mod assignment_ports;
mod assignment_service;
mod delegation_guard;
mod scoped_access_service;

pub use actor::Actor;
pub use assignment_ports::{
    AuditEvent, AuditRepository, DirectoryUser, MembershipField, RoleAssignmentStore,
    UserDirectory,
};
pub use assignment_service::{AssignableUser, AssignmentService};
pub use delegation_guard::{DelegationGuard, DelegationRequest};
pub use scoped_access_service::ScopedAccessService;
