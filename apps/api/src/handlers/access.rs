use axum::Json;
use axum::extract::{Extension, State};

use geoscope_application::Actor;
use geoscope_domain::GeoLocation;

use crate::dto::{
    AccessCheckRequest, AccessCheckResponse, FilterRecordsRequest, FilterRecordsResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn filter_records_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<FilterRecordsRequest>,
) -> ApiResult<Json<FilterRecordsResponse>> {
    let records = state
        .scoped_access_service
        .filter_visible(&actor, payload.records)
        .await?;

    Ok(Json(FilterRecordsResponse { records }))
}

pub async fn check_access_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<AccessCheckRequest>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let location = GeoLocation::new(payload.city, payload.taluka);
    let allowed = state
        .scoped_access_service
        .can_view(&actor, &location)
        .await?;

    Ok(Json(AccessCheckResponse { allowed }))
}
