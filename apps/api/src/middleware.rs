use std::str::FromStr;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use geoscope_application::Actor;
use geoscope_core::AppError;
use geoscope_domain::{Role, UserId};

use crate::error::ApiResult;

/// Header carrying the authenticated user id, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role label.
pub const USER_ROLE_HEADER: &str = "x-user-role";

pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let user_id = header_value(&request, USER_ID_HEADER).and_then(|value| {
        UserId::from_str(value)
            .map_err(|_| AppError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))
    })?;
    let role = header_value(&request, USER_ROLE_HEADER).and_then(|value| {
        Role::from_str(value)
            .map_err(|_| AppError::Unauthorized(format!("malformed {USER_ROLE_HEADER} header")))
    })?;

    request.extensions_mut().insert(Actor::new(user_id, role));
    Ok(next.run(request).await)
}

fn header_value<'a>(request: &'a Request, name: &str) -> Result<&'a str, AppError> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized(format!("{name} header is required")))
}
