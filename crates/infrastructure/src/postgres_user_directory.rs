use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use geoscope_application::{DirectoryUser, UserDirectory};
use geoscope_core::{AppError, AppResult};
use geoscope_domain::{Role, UserId};

/// PostgreSQL-backed user directory over `console_users`.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ConsoleUserRow {
    id: uuid::Uuid,
    display_name: String,
    email: Option<String>,
    role_label: String,
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn get_users_by_role(&self, role: Role) -> AppResult<Vec<DirectoryUser>> {
        let rows = sqlx::query_as::<_, ConsoleUserRow>(
            r#"
            SELECT id, display_name, email, role_label
            FROM console_users
            WHERE role_label = $1
            ORDER BY display_name, id
            "#,
        )
        .bind(role.label())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users by role: {error}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(DirectoryUser {
                    user_id: UserId::from_uuid(row.id),
                    display_name: row.display_name,
                    email: row.email,
                    role: Role::from_str(row.role_label.as_str())?,
                })
            })
            .collect()
    }
}
