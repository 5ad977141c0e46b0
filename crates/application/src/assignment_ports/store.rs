use async_trait::async_trait;
use geoscope_core::AppResult;
use geoscope_domain::{Assignment, Role, UserId};

/// Array field of an assignment that membership queries search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipField {
    /// `assigned_cities`.
    AssignedCities,
    /// `assigned_talukas`.
    AssignedTalukas,
}

impl MembershipField {
    /// Returns the stored field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssignedCities => "assigned_cities",
            Self::AssignedTalukas => "assigned_talukas",
        }
    }
}

/// Keyed persistence for assignment records.
///
/// Records are keyed by `(user_id, role)`. `upsert` must be atomic: concurrent writes
/// to one key resolve to exactly one of the written values. Implementations report a
/// failed atomic write as `AppError::Conflict` and never retry.
#[async_trait]
pub trait RoleAssignmentStore: Send + Sync {
    /// Returns the assignment for one user and role.
    async fn get(&self, user_id: UserId, role: Role) -> AppResult<Option<Assignment>>;

    /// Lists every assignment held by one user.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Assignment>>;

    /// Inserts or wholesale replaces the assignment for its `(user_id, role)` key.
    async fn upsert(&self, assignment: Assignment) -> AppResult<Assignment>;

    /// Deletes the assignment and returns whether one existed.
    async fn delete(&self, user_id: UserId, role: Role) -> AppResult<bool>;

    /// Lists all assignments recorded for a role.
    async fn list_by_role(&self, role: Role) -> AppResult<Vec<Assignment>>;

    /// Lists assignments of a role whose array field contains `value`.
    ///
    /// Matching ignores case.
    async fn list_by_membership(
        &self,
        role: Role,
        field: MembershipField,
        value: &str,
    ) -> AppResult<Vec<Assignment>>;
}
