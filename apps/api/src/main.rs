//! Geoscope API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use geoscope_application::{AssignmentService, DelegationGuard, ScopedAccessService};
use geoscope_core::AppError;
use geoscope_infrastructure::{
    PostgresAuditRepository, PostgresRoleAssignmentStore, PostgresUserDirectory,
    load_catalog_from_path,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let catalog = Arc::new(load_catalog_from_path(&config.catalog_path)?);
    let assignment_store = Arc::new(PostgresRoleAssignmentStore::new(pool.clone()));
    let user_directory = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool));

    let app_state = AppState {
        assignment_service: AssignmentService::new(
            catalog.clone(),
            assignment_store.clone(),
            user_directory,
            audit_repository,
        ),
        delegation_guard: DelegationGuard::new(catalog.clone(), assignment_store.clone()),
        scoped_access_service: ScopedAccessService::new(assignment_store),
        catalog,
    };

    let app = api_router::build_router(app_state);
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "geoscope-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
