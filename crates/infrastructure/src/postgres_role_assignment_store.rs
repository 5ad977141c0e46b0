use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;

use geoscope_application::{MembershipField, RoleAssignmentStore};
use geoscope_core::{AppError, AppResult};
use geoscope_domain::{Assignment, Role, UserId};


/// PostgreSQL-backed assignment store over `geo_role_assignments`.
///
/// Writes are single `INSERT .. ON CONFLICT (user_id, role) DO UPDATE` statements, so
/// concurrent reassignments of one key resolve last-write-wins at the row level.
#[derive(Clone)]
pub struct PostgresRoleAssignmentStore {
    pool: PgPool,
}

impl PostgresRoleAssignmentStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    user_id: uuid::Uuid,
    role: String,
    assigned_cities: Vec<String>,
    assigned_talukas: Vec<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Assignment::new(
            UserId::from_uuid(row.user_id),
            Role::from_str(row.role.as_str())?,
            row.assigned_cities,
            row.assigned_talukas,
            row.updated_at,
        ))
    }
}

fn into_assignments(rows: Vec<AssignmentRow>) -> AppResult<Vec<Assignment>> {
    rows.into_iter().map(Assignment::try_from).collect()
}

/// SQL rendering of the name normalization used for membership matching.
///
/// Cities lose every trailing `(city)` suffix like `normalize_city`; talukas only fold
/// case and surrounding whitespace.
fn membership_key(field: MembershipField, operand: &str) -> String {
    match field {
        MembershipField::AssignedCities => format!(
            r"btrim(regexp_replace(lower(btrim({operand})), '(\s*\(city\))+$', ''))"
        ),
        MembershipField::AssignedTalukas => format!("lower(btrim({operand}))"),
    }
}

fn map_write_error(error: sqlx::Error, user_id: UserId, role: Role) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        if matches!(
            database_error.code().as_deref(),
            Some("23505" | "40001" | "40P01")
        ) {
            warn!(%user_id, role = role.as_str(), "assignment write conflict");
            return AppError::Conflict(format!(
                "concurrent write to {} assignment of '{user_id}'",
                role.label()
            ));
        }
    }

    AppError::Internal(format!("failed to write assignment: {error}"))
}

#[async_trait]
impl RoleAssignmentStore for PostgresRoleAssignmentStore {
    async fn get(&self, user_id: UserId, role: Role) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, role, assigned_cities, assigned_talukas, updated_at
            FROM geo_role_assignments
            WHERE user_id = $1 AND role = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load assignment: {error}")))?
        .map(Assignment::try_from)
        .transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, role, assigned_cities, assigned_talukas, updated_at
            FROM geo_role_assignments
            WHERE user_id = $1
            ORDER BY role
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user assignments: {error}")))?;

        into_assignments(rows)
    }

    async fn upsert(&self, assignment: Assignment) -> AppResult<Assignment> {
        let user_id = assignment.user_id();
        let role = assignment.role();

        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO geo_role_assignments (
                user_id,
                role,
                assigned_cities,
                assigned_talukas,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, role) DO UPDATE
            SET assigned_cities = EXCLUDED.assigned_cities,
                assigned_talukas = EXCLUDED.assigned_talukas,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, role, assigned_cities, assigned_talukas, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .bind(assignment.assigned_cities().to_vec())
        .bind(assignment.assigned_talukas().to_vec())
        .bind(assignment.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, user_id, role))?;

        Assignment::try_from(row)
    }

    async fn delete(&self, user_id: UserId, role: Role) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM geo_role_assignments
            WHERE user_id = $1 AND role = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete assignment: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, role, assigned_cities, assigned_talukas, updated_at
            FROM geo_role_assignments
            WHERE role = $1
            ORDER BY updated_at DESC, user_id
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list assignments: {error}")))?;

        into_assignments(rows)
    }

    async fn list_by_membership(
        &self,
        role: Role,
        field: MembershipField,
        value: &str,
    ) -> AppResult<Vec<Assignment>> {
        // Column and match expression come from a closed enum, never from input.
        let statement = format!(
            r#"
            SELECT user_id, role, assigned_cities, assigned_talukas, updated_at
            FROM geo_role_assignments
            WHERE role = $1
              AND EXISTS (
                  SELECT 1
                  FROM unnest({column}) AS member
                  WHERE {member} = {value}
              )
            ORDER BY updated_at DESC, user_id
            "#,
            column = field.as_str(),
            member = membership_key(field, "member"),
            value = membership_key(field, "$2"),
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(statement.as_str())
            .bind(role.as_str())
            .bind(value.trim())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list assignments by {}: {error}",
                    field.as_str()
                ))
            })?;

        into_assignments(rows)
    }
}
