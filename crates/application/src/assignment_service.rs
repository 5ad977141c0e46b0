use std::sync::Arc;

use geoscope_core::AppResult;
use geoscope_domain::{AuditAction, GeographicCatalog};

use crate::{Actor, AuditEvent, AuditRepository, RoleAssignmentStore, UserDirectory};

mod grants;
mod listings;
mod selection;

pub use listings::AssignableUser;

/// Application service owning every assignment write.
///
/// Selections are validated against the geographic catalog before anything reaches
/// the store. The service does not check who is calling; callers run
/// [`crate::DelegationGuard`] first. The actor is used for audit attribution only.
#[derive(Clone)]
pub struct AssignmentService {
    catalog: Arc<GeographicCatalog>,
    store: Arc<dyn RoleAssignmentStore>,
    user_directory: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl AssignmentService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog: Arc<GeographicCatalog>,
        store: Arc<dyn RoleAssignmentStore>,
        user_directory: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            catalog,
            store,
            user_directory,
            audit_repository,
        }
    }

    /// Returns the catalog the service validates against.
    #[must_use]
    pub fn catalog(&self) -> &GeographicCatalog {
        self.catalog.as_ref()
    }

    async fn append_audit(
        &self,
        actor: &Actor,
        action: AuditAction,
        resource_id: String,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.subject(),
                action,
                resource_type: "geo_assignment".to_owned(),
                resource_id,
                detail: Some(detail),
            })
            .await
    }
}
