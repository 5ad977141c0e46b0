use std::collections::HashMap;

use async_trait::async_trait;
use geoscope_application::{MembershipField, RoleAssignmentStore};
use geoscope_core::AppResult;
use geoscope_domain::{Assignment, Role, UserId, same_city, same_taluka};
use tokio::sync::RwLock;

/// In-memory assignment store.
///
/// Every write holds the map's write lock for the whole replacement, so concurrent
/// upserts of one key serialize and the last one wins.
#[derive(Debug, Default)]
pub struct InMemoryRoleAssignmentStore {
    assignments: RwLock<HashMap<(UserId, Role), Assignment>>,
}

impl InMemoryRoleAssignmentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assignments: RwLock::new(HashMap::new()),
        }
    }

    async fn collect_sorted<F>(&self, predicate: F) -> Vec<Assignment>
    where
        F: Fn(&Assignment) -> bool,
    {
        let assignments = self.assignments.read().await;
        let mut values: Vec<Assignment> = assignments
            .values()
            .filter(|assignment| predicate(assignment))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            left.user_id()
                .cmp(&right.user_id())
                .then(left.role().cmp(&right.role()))
        });

        values
    }
}

#[async_trait]
impl RoleAssignmentStore for InMemoryRoleAssignmentStore {
    async fn get(&self, user_id: UserId, role: Role) -> AppResult<Option<Assignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .get(&(user_id, role))
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Assignment>> {
        Ok(self
            .collect_sorted(|assignment| assignment.user_id() == user_id)
            .await)
    }

    async fn upsert(&self, assignment: Assignment) -> AppResult<Assignment> {
        self.assignments.write().await.insert(
            (assignment.user_id(), assignment.role()),
            assignment.clone(),
        );

        Ok(assignment)
    }

    async fn delete(&self, user_id: UserId, role: Role) -> AppResult<bool> {
        Ok(self
            .assignments
            .write()
            .await
            .remove(&(user_id, role))
            .is_some())
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<Assignment>> {
        Ok(self
            .collect_sorted(|assignment| assignment.role() == role)
            .await)
    }

    async fn list_by_membership(
        &self,
        role: Role,
        field: MembershipField,
        value: &str,
    ) -> AppResult<Vec<Assignment>> {
        Ok(self
            .collect_sorted(|assignment| {
                assignment.role() == role
                    && match field {
                        MembershipField::AssignedCities => assignment
                            .assigned_cities()
                            .iter()
                            .any(|city| same_city(city, value)),
                        MembershipField::AssignedTalukas => assignment
                            .assigned_talukas()
                            .iter()
                            .any(|taluka| same_taluka(taluka, value)),
                    }
            })
            .await)
    }
}
