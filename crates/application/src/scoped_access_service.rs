use std::sync::Arc;

use geoscope_core::AppResult;
use geoscope_domain::{
    Assignment, GeoTagged, Role, filter_by_permission, has_access_to_city, has_access_to_taluka,
    is_visible,
};

use crate::{Actor, RoleAssignmentStore};

/// Read-path service applying geographic scope to data leaving the service boundary.
///
/// The caller's assignment is resolved from the store on every call. A missing
/// assignment denies; a store failure is returned as an error and never widens access.
#[derive(Clone)]
pub struct ScopedAccessService {
    store: Arc<dyn RoleAssignmentStore>,
}

impl ScopedAccessService {
    /// Creates a new service from the assignment store.
    #[must_use]
    pub fn new(store: Arc<dyn RoleAssignmentStore>) -> Self {
        Self { store }
    }

    /// Returns the caller's assignment. General never needs one.
    pub async fn resolve_assignment(&self, actor: &Actor) -> AppResult<Option<Assignment>> {
        if !actor.role().requires_assignment() {
            return Ok(None);
        }

        self.store.get(actor.user_id(), actor.role()).await
    }

    /// Keeps the records the caller may view.
    pub async fn filter_visible<R>(&self, actor: &Actor, records: Vec<R>) -> AppResult<Vec<R>>
    where
        R: GeoTagged + Send,
    {
        if actor.role() == Role::General {
            return Ok(records);
        }

        let assignment = self.resolve_assignment(actor).await?;
        Ok(filter_by_permission(records, actor.role(), assignment.as_ref()))
    }

    /// Returns whether the caller may open one record.
    pub async fn can_view<R>(&self, actor: &Actor, record: &R) -> AppResult<bool>
    where
        R: GeoTagged + Sync + ?Sized,
    {
        let assignment = self.resolve_assignment(actor).await?;
        Ok(is_visible(record, actor.role(), assignment.as_ref()))
    }

    /// Returns whether the caller holds city-level access to `city`.
    pub async fn can_view_city(&self, actor: &Actor, city: &str) -> AppResult<bool> {
        let assignment = self.resolve_assignment(actor).await?;
        Ok(has_access_to_city(actor.role(), assignment.as_ref(), city))
    }

    /// Returns whether the caller holds access to `taluka`.
    pub async fn can_view_taluka(&self, actor: &Actor, taluka: &str) -> AppResult<bool> {
        let assignment = self.resolve_assignment(actor).await?;
        Ok(has_access_to_taluka(actor.role(), assignment.as_ref(), taluka))
    }
}
