use geoscope_application::Actor;
use geoscope_core::AppError;
use geoscope_domain::{Role, can_assign_role};

pub mod access;
pub mod assignments;
pub mod directory;
pub mod geo;
pub mod health;

/// Listings of a role are visible only to callers ranked above it.
fn ensure_outranks(actor: &Actor, role: Role) -> Result<(), AppError> {
    if can_assign_role(actor.role(), role) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "insufficient hierarchy: {} may not view {} assignments",
        actor.role(),
        role
    )))
}
