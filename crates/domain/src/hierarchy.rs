//! Pure predicates over the four-tier role hierarchy.
//!
//! None of these functions enforce anything; callers combine them into guards. A
//! missing assignment, or one recorded for a different role, never grants access
//! below the General tier.

use crate::geography::{same_city, same_taluka};
use crate::{Assignment, Role};

/// Returns whether `acting` may delegate scope to `target`.
///
/// Delegation only flows strictly downward: equal rank never qualifies.
#[must_use]
pub fn can_assign_role(acting: Role, target: Role) -> bool {
    acting.rank() > target.rank()
}

/// Returns whether the role may see data tagged with the city.
///
/// Salesmen hold no city-level grant and are always denied here.
#[must_use]
pub fn has_access_to_city(role: Role, assignment: Option<&Assignment>, city: &str) -> bool {
    match role {
        Role::General => true,
        Role::SubGeneral | Role::HrGeneral => scoped_assignment(role, assignment)
            .is_some_and(|assignment| {
                assignment
                    .assigned_cities()
                    .iter()
                    .any(|assigned| same_city(assigned, city))
            }),
        Role::Salesman => false,
    }
}

/// Returns whether the role may see data tagged with the taluka.
#[must_use]
pub fn has_access_to_taluka(role: Role, assignment: Option<&Assignment>, taluka: &str) -> bool {
    match role {
        Role::General => true,
        Role::SubGeneral | Role::HrGeneral => scoped_assignment(role, assignment)
            .is_some_and(|assignment| {
                assignment
                    .assigned_talukas()
                    .iter()
                    .any(|assigned| same_taluka(assigned, taluka))
            }),
        Role::Salesman => scoped_assignment(role, assignment)
            .and_then(Assignment::single_taluka)
            .is_some_and(|assigned| same_taluka(assigned, taluka)),
    }
}

/// Returns the assignment only when it was recorded for `role`.
pub(crate) fn scoped_assignment(
    role: Role,
    assignment: Option<&Assignment>,
) -> Option<&Assignment> {
    assignment.filter(|assignment| assignment.role() == role)
}
