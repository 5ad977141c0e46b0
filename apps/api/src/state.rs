use std::sync::Arc;

use geoscope_application::{AssignmentService, DelegationGuard, ScopedAccessService};
use geoscope_domain::GeographicCatalog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub assignment_service: AssignmentService,
    pub delegation_guard: DelegationGuard,
    pub scoped_access_service: ScopedAccessService,
    pub catalog: Arc<GeographicCatalog>,
}
