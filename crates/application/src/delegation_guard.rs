use std::sync::Arc;

use geoscope_core::{AppError, AppResult};
use geoscope_domain::{
    Assignment, GeographicCatalog, Role, UserId, can_assign_role, has_access_to_city,
    has_access_to_taluka, same_city,
};

use crate::{Actor, RoleAssignmentStore};

/// Delegation an actor is about to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationRequest<'a> {
    /// City grant for a Sub-General.
    SubGeneralCities {
        /// Requested cities.
        cities: &'a [String],
    },
    /// Taluka grant for an HR-General.
    HrGeneralTalukas {
        /// Requested city context.
        city: &'a str,
        /// Requested talukas.
        talukas: &'a [String],
    },
    /// Single taluka grant for a Salesman.
    SalesmanTaluka {
        /// Requested taluka.
        taluka: &'a str,
        /// Optional owning city.
        city_hint: Option<&'a str>,
    },
    /// Removal of a stored assignment.
    Revoke {
        /// Subordinate losing the assignment.
        user_id: UserId,
        /// Role of the assignment.
        role: Role,
    },
}

impl DelegationRequest<'_> {
    /// Returns the role receiving or losing scope.
    #[must_use]
    pub fn target_role(&self) -> Role {
        match self {
            Self::SubGeneralCities { .. } => Role::SubGeneral,
            Self::HrGeneralTalukas { .. } => Role::HrGeneral,
            Self::SalesmanTaluka { .. } => Role::Salesman,
            Self::Revoke { role, .. } => *role,
        }
    }
}

/// Caller-side guard enforcing strictly downward delegation without escalation.
///
/// The actor must outrank the target role, and below General may only hand out
/// geography it holds itself. Violations surface as `AppError::Forbidden`.
#[derive(Clone)]
pub struct DelegationGuard {
    catalog: Arc<GeographicCatalog>,
    store: Arc<dyn RoleAssignmentStore>,
}

impl DelegationGuard {
    /// Creates a guard reading the actor's own scope from `store`.
    #[must_use]
    pub fn new(catalog: Arc<GeographicCatalog>, store: Arc<dyn RoleAssignmentStore>) -> Self {
        Self { catalog, store }
    }

    /// Ensures the actor may perform the delegation.
    pub async fn ensure_can_delegate(
        &self,
        actor: &Actor,
        request: &DelegationRequest<'_>,
    ) -> AppResult<()> {
        let target_role = request.target_role();
        if !can_assign_role(actor.role(), target_role) {
            return Err(AppError::Forbidden(format!(
                "insufficient hierarchy: {} may not assign {}",
                actor.role(),
                target_role
            )));
        }

        if actor.role() == Role::General {
            return Ok(());
        }

        let actor_assignment = self
            .store
            .get(actor.user_id(), actor.role())
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(format!(
                    "{} '{}' holds no geographic assignment",
                    actor.role(),
                    actor.user_id()
                ))
            })?;

        let within_scope = match request {
            DelegationRequest::SubGeneralCities { cities } => cities
                .iter()
                .all(|city| has_access_to_city(actor.role(), Some(&actor_assignment), city)),
            DelegationRequest::HrGeneralTalukas { city, .. } => {
                has_access_to_city(actor.role(), Some(&actor_assignment), city)
            }
            DelegationRequest::SalesmanTaluka { taluka, city_hint } => {
                self.taluka_within_scope(actor.role(), &actor_assignment, taluka, *city_hint)
            }
            DelegationRequest::Revoke { user_id, role } => {
                match self.store.get(*user_id, *role).await? {
                    Some(target) => {
                        self.assignment_within_scope(actor.role(), &actor_assignment, &target)
                    }
                    None => true,
                }
            }
        };

        if within_scope {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{} '{}' may not delegate geography outside its own scope",
                actor.role(),
                actor.user_id()
            )))
        }
    }

    /// Every city the taluka could end up attributed to must be inside the actor's
    /// scope, so an ambiguous taluka name cannot leak another city's records.
    fn taluka_within_scope(
        &self,
        actor_role: Role,
        actor_assignment: &Assignment,
        taluka: &str,
        city_hint: Option<&str>,
    ) -> bool {
        let candidate_cities: Vec<&str> = match city_hint.filter(|hint| !hint.trim().is_empty()) {
            Some(hint) => vec![hint],
            None => self.catalog.cities_containing(taluka),
        };

        match actor_role {
            Role::General => true,
            Role::SubGeneral => candidate_cities
                .iter()
                .all(|city| has_access_to_city(actor_role, Some(actor_assignment), city)),
            Role::HrGeneral => {
                has_access_to_taluka(actor_role, Some(actor_assignment), taluka)
                    && match actor_assignment.city_context() {
                        Some(context) => candidate_cities
                            .iter()
                            .all(|city| same_city(city, context)),
                        None => true,
                    }
            }
            Role::Salesman => false,
        }
    }

    fn assignment_within_scope(
        &self,
        actor_role: Role,
        actor_assignment: &Assignment,
        target: &Assignment,
    ) -> bool {
        match target.role() {
            Role::General => false,
            Role::SubGeneral => target
                .assigned_cities()
                .iter()
                .all(|city| has_access_to_city(actor_role, Some(actor_assignment), city)),
            Role::HrGeneral => target
                .city_context()
                .is_some_and(|city| has_access_to_city(actor_role, Some(actor_assignment), city)),
            Role::Salesman => target.single_taluka().is_some_and(|taluka| {
                self.taluka_within_scope(
                    actor_role,
                    actor_assignment,
                    taluka,
                    target.city_context(),
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use geoscope_core::{AppError, AppResult};
    use geoscope_domain::{Assignment, GeographicCatalog, Role, UserId};

    use crate::{Actor, MembershipField, RoleAssignmentStore};

    use super::{DelegationGuard, DelegationRequest};

    #[derive(Default)]
    struct FakeAssignmentStore {
        assignments: Mutex<HashMap<(UserId, Role), Assignment>>,
    }

    #[async_trait]
    impl RoleAssignmentStore for FakeAssignmentStore {
        async fn get(&self, user_id: UserId, role: Role) -> AppResult<Option<Assignment>> {
            Ok(self.assignments.lock().await.get(&(user_id, role)).cloned())
        }

        async fn list_for_user(&self, _user_id: UserId) -> AppResult<Vec<Assignment>> {
            Ok(Vec::new())
        }

        async fn upsert(&self, assignment: Assignment) -> AppResult<Assignment> {
            self.assignments.lock().await.insert(
                (assignment.user_id(), assignment.role()),
                assignment.clone(),
            );
            Ok(assignment)
        }

        async fn delete(&self, _user_id: UserId, _role: Role) -> AppResult<bool> {
            Ok(false)
        }

        async fn list_by_role(&self, _role: Role) -> AppResult<Vec<Assignment>> {
            Ok(Vec::new())
        }

        async fn list_by_membership(
            &self,
            _role: Role,
            _field: MembershipField,
            _value: &str,
        ) -> AppResult<Vec<Assignment>> {
            Ok(Vec::new())
        }
    }

    fn catalog() -> Arc<GeographicCatalog> {
        Arc::new(
            GeographicCatalog::from_entries([
                ("Surat (City)", vec!["Surat City", "Bardoli"]),
                ("Bhavnagar", vec!["Mahuva", "Talaja"]),
                ("Junagadh", vec!["Mahuva", "Keshod"]),
            ])
            .unwrap_or_default(),
        )
    }

    async fn seeded(
        role: Role,
        cities: &[&str],
        talukas: &[&str],
    ) -> (DelegationGuard, Arc<FakeAssignmentStore>, Actor) {
        let store = Arc::new(FakeAssignmentStore::default());
        let actor = Actor::new(UserId::new(), role);
        let _ = store
            .upsert(Assignment::new(
                actor.user_id(),
                role,
                strings(cities),
                strings(talukas),
                Utc::now(),
            ))
            .await;
        (DelegationGuard::new(catalog(), store.clone()), store, actor)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[tokio::test]
    async fn equal_rank_is_forbidden() {
        let (guard, _, actor) = seeded(Role::HrGeneral, &["Surat (City)"], &["Bardoli"]).await;
        let talukas = strings(&["Bardoli"]);

        let result = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::HrGeneralTalukas {
                    city: "Surat (City)",
                    talukas: &talukas,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn general_is_unrestricted() {
        let guard = DelegationGuard::new(catalog(), Arc::new(FakeAssignmentStore::default()));
        let actor = Actor::new(UserId::new(), Role::General);
        let cities = strings(&["Junagadh"]);

        let result = guard
            .ensure_can_delegate(&actor, &DelegationRequest::SubGeneralCities { cities: &cities })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn sub_general_delegates_only_own_cities() {
        let (guard, _, actor) = seeded(Role::SubGeneral, &["Surat (City)"], &[]).await;
        let talukas = strings(&["Mahuva"]);

        let inside = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::HrGeneralTalukas {
                    city: "surat",
                    talukas: &talukas,
                },
            )
            .await;
        let outside = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::HrGeneralTalukas {
                    city: "Bhavnagar",
                    talukas: &talukas,
                },
            )
            .await;

        assert!(inside.is_ok());
        assert!(matches!(outside, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn actor_without_assignment_is_forbidden() {
        let guard = DelegationGuard::new(catalog(), Arc::new(FakeAssignmentStore::default()));
        let actor = Actor::new(UserId::new(), Role::SubGeneral);

        let result = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::SalesmanTaluka {
                    taluka: "Bardoli",
                    city_hint: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn hr_general_delegates_only_own_talukas() {
        let (guard, _, actor) = seeded(Role::HrGeneral, &["Bhavnagar"], &["Mahuva"]).await;

        let own = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::SalesmanTaluka {
                    taluka: "Mahuva",
                    city_hint: Some("Bhavnagar"),
                },
            )
            .await;
        let foreign = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::SalesmanTaluka {
                    taluka: "Talaja",
                    city_hint: None,
                },
            )
            .await;

        assert!(own.is_ok());
        assert!(matches!(foreign, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn ambiguous_taluka_must_stay_in_actor_city() {
        let (guard, _, actor) = seeded(Role::HrGeneral, &["Bhavnagar"], &["Mahuva"]).await;

        let unhinted = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::SalesmanTaluka {
                    taluka: "Mahuva",
                    city_hint: None,
                },
            )
            .await;
        let other_city = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::SalesmanTaluka {
                    taluka: "Mahuva",
                    city_hint: Some("Junagadh"),
                },
            )
            .await;

        assert!(matches!(unhinted, Err(AppError::Forbidden(_))));
        assert!(matches!(other_city, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn revoke_outside_scope_is_forbidden() {
        let (guard, store, actor) = seeded(Role::SubGeneral, &["Surat (City)"], &[]).await;
        let foreign_hr = UserId::new();
        let _ = store
            .upsert(Assignment::new(
                foreign_hr,
                Role::HrGeneral,
                strings(&["Junagadh"]),
                strings(&["Keshod"]),
                Utc::now(),
            ))
            .await;

        let foreign = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::Revoke {
                    user_id: foreign_hr,
                    role: Role::HrGeneral,
                },
            )
            .await;
        let missing = guard
            .ensure_can_delegate(
                &actor,
                &DelegationRequest::Revoke {
                    user_id: UserId::new(),
                    role: Role::HrGeneral,
                },
            )
            .await;

        assert!(matches!(foreign, Err(AppError::Forbidden(_))));
        assert!(missing.is_ok());
    }
}
