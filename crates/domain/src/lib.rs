//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod assignment;
mod geography;
mod hierarchy;
mod permission_filter;
mod role;
mod security;
mod user;

pub use assignment::Assignment;
pub use geography::{
    GeographicCatalog, normalize_city, normalize_taluka, same_city, same_taluka,
};
pub use hierarchy::{can_assign_role, has_access_to_city, has_access_to_taluka};
pub use permission_filter::{GeoLocation, GeoTagged, filter_by_permission, is_visible};
pub use role::Role;
pub use security::AuditAction;
pub use user::UserId;
