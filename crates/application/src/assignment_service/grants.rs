use chrono::Utc;

use geoscope_core::AppResult;
use geoscope_domain::{Assignment, AuditAction, Role, UserId};

use super::selection::{validate_cities, validate_city_talukas, validate_salesman_taluka};
use super::*;

impl AssignmentService {
    /// Grants a set of cities to a Sub-General, replacing any previous grant.
    pub async fn assign_cities_to_sub_general(
        &self,
        actor: &Actor,
        sub_general_id: UserId,
        cities: &[String],
    ) -> AppResult<Assignment> {
        let cities = validate_cities(self.catalog(), cities)?;
        let detail = format!("assigned cities [{}]", cities.join(", "));

        self.write_assignment(
            actor,
            Assignment::new(sub_general_id, Role::SubGeneral, cities, Vec::new(), Utc::now()),
            detail,
        )
        .await
    }

    /// Grants talukas inside one city context to an HR-General.
    pub async fn assign_talukas_to_hr_general(
        &self,
        actor: &Actor,
        hr_general_id: UserId,
        talukas: &[String],
        city_context: &str,
    ) -> AppResult<Assignment> {
        let (city, talukas) = validate_city_talukas(self.catalog(), talukas, city_context)?;
        let detail = format!("assigned talukas [{}] in '{city}'", talukas.join(", "));

        self.write_assignment(
            actor,
            Assignment::new(hr_general_id, Role::HrGeneral, vec![city], talukas, Utc::now()),
            detail,
        )
        .await
    }

    /// Grants exactly one taluka to a Salesman.
    ///
    /// The owning city is recorded when `city_hint` names it or when the taluka name
    /// occurs under a single city only.
    pub async fn assign_taluka_to_salesman(
        &self,
        actor: &Actor,
        salesman_id: UserId,
        taluka: &str,
        city_hint: Option<&str>,
    ) -> AppResult<Assignment> {
        let grant = validate_salesman_taluka(self.catalog(), taluka, city_hint)?;
        let detail = match grant.city.as_deref() {
            Some(city) => format!("assigned taluka '{}' in '{city}'", grant.taluka),
            None => format!("assigned taluka '{}'", grant.taluka),
        };

        self.write_assignment(
            actor,
            Assignment::new(
                salesman_id,
                Role::Salesman,
                grant.city.into_iter().collect(),
                vec![grant.taluka],
                Utc::now(),
            ),
            detail,
        )
        .await
    }

    /// Deletes the assignment for one user and role.
    ///
    /// Returns `false` without error when nothing was stored.
    pub async fn revoke_assignment(
        &self,
        actor: &Actor,
        user_id: UserId,
        role: Role,
    ) -> AppResult<bool> {
        let removed = self.store.delete(user_id, role).await?;
        if removed {
            self.append_audit(
                actor,
                AuditAction::GeoAssignmentRevoked,
                assignment_resource_id(user_id, role),
                format!("revoked {} assignment of '{user_id}'", role.label()),
            )
            .await?;
        }

        Ok(removed)
    }

    async fn write_assignment(
        &self,
        actor: &Actor,
        assignment: Assignment,
        detail: String,
    ) -> AppResult<Assignment> {
        let stored = self.store.upsert(assignment).await?;

        self.append_audit(
            actor,
            AuditAction::GeoAssignmentGranted,
            assignment_resource_id(stored.user_id(), stored.role()),
            detail,
        )
        .await?;

        Ok(stored)
    }
}

fn assignment_resource_id(user_id: UserId, role: Role) -> String {
    format!("{user_id}:{}", role.as_str())
}
