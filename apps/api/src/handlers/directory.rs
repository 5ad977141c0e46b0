use axum::Json;
use axum::extract::{Extension, Path, State};

use geoscope_application::Actor;
use geoscope_domain::Role;

use crate::dto::AssignableUserResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::ensure_outranks;

pub async fn assignable_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(role): Path<String>,
) -> ApiResult<Json<Vec<AssignableUserResponse>>> {
    let role = Role::from_transport(role.as_str())?;
    ensure_outranks(&actor, role)?;

    let users = state
        .assignment_service
        .assignable_users(role)
        .await?
        .into_iter()
        .map(AssignableUserResponse::from)
        .collect();

    Ok(Json(users))
}
