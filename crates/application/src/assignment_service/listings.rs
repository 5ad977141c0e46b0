use geoscope_core::AppResult;
use geoscope_domain::{Assignment, Role, UserId};

use crate::{DirectoryUser, MembershipField};

use super::*;

/// Directory user paired with the assignment currently stored for the listed role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignableUser {
    /// Directory projection.
    pub user: DirectoryUser,
    /// Current assignment, if any.
    pub assignment: Option<Assignment>,
}

impl AssignmentService {
    /// Returns the stored assignment for one user and role.
    pub async fn find_assignment(
        &self,
        user_id: UserId,
        role: Role,
    ) -> AppResult<Option<Assignment>> {
        self.store.get(user_id, role).await
    }

    /// Returns every assignment held by one user.
    pub async fn list_user_assignments(&self, user_id: UserId) -> AppResult<Vec<Assignment>> {
        self.store.list_for_user(user_id).await
    }

    /// Lists all assignments recorded for a role.
    pub async fn list_assignments(&self, role: Role) -> AppResult<Vec<Assignment>> {
        self.store.list_by_role(role).await
    }

    /// Lists HR-Generals whose city context is `city`.
    ///
    /// Unknown cities yield an empty list.
    pub async fn hr_generals_in_city(&self, city: &str) -> AppResult<Vec<Assignment>> {
        let Some(city) = self.catalog().resolve_city(city) else {
            return Ok(Vec::new());
        };

        self.store
            .list_by_membership(Role::HrGeneral, MembershipField::AssignedCities, city)
            .await
    }

    /// Lists Salesmen assigned to `taluka`.
    ///
    /// With a `city`, Salesmen recorded under another city are left out.
    pub async fn salesmen_in_taluka(
        &self,
        taluka: &str,
        city: Option<&str>,
    ) -> AppResult<Vec<Assignment>> {
        let assignments = self
            .store
            .list_by_membership(Role::Salesman, MembershipField::AssignedTalukas, taluka.trim())
            .await?;

        Ok(match city {
            Some(city) => assignments
                .into_iter()
                .filter(|assignment| {
                    assignment
                        .city_context()
                        .is_none_or(|recorded| geoscope_domain::same_city(recorded, city))
                })
                .collect(),
            None => assignments,
        })
    }

    /// Lists directory users of `role` with their current assignment.
    pub async fn assignable_users(&self, role: Role) -> AppResult<Vec<AssignableUser>> {
        let users = self.user_directory.get_users_by_role(role).await?;
        let assignments = self.store.list_by_role(role).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let assignment = assignments
                    .iter()
                    .find(|assignment| assignment.user_id() == user.user_id)
                    .cloned();
                AssignableUser { user, assignment }
            })
            .collect())
    }
}
