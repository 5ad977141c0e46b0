use super::*;

pub async fn assign_sub_general_cities_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignSubGeneralCitiesRequest>,
) -> ApiResult<Json<AssignmentResponse>> {
    let user_id = UserId::from_str(user_id.as_str())?;

    state
        .delegation_guard
        .ensure_can_delegate(
            &actor,
            &DelegationRequest::SubGeneralCities {
                cities: payload.cities.as_slice(),
            },
        )
        .await?;

    let assignment = state
        .assignment_service
        .assign_cities_to_sub_general(&actor, user_id, payload.cities.as_slice())
        .await?;

    Ok(Json(AssignmentResponse::from(assignment)))
}

pub async fn assign_hr_general_talukas_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignHrGeneralTalukasRequest>,
) -> ApiResult<Json<AssignmentResponse>> {
    let user_id = UserId::from_str(user_id.as_str())?;

    state
        .delegation_guard
        .ensure_can_delegate(
            &actor,
            &DelegationRequest::HrGeneralTalukas {
                city: payload.city.as_str(),
                talukas: payload.talukas.as_slice(),
            },
        )
        .await?;

    let assignment = state
        .assignment_service
        .assign_talukas_to_hr_general(
            &actor,
            user_id,
            payload.talukas.as_slice(),
            payload.city.as_str(),
        )
        .await?;

    Ok(Json(AssignmentResponse::from(assignment)))
}

pub async fn assign_salesman_taluka_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignSalesmanTalukaRequest>,
) -> ApiResult<Json<AssignmentResponse>> {
    let user_id = UserId::from_str(user_id.as_str())?;
    let city_hint = payload
        .city
        .as_deref()
        .filter(|city| !city.trim().is_empty());

    state
        .delegation_guard
        .ensure_can_delegate(
            &actor,
            &DelegationRequest::SalesmanTaluka {
                taluka: payload.taluka.as_str(),
                city_hint,
            },
        )
        .await?;

    let assignment = state
        .assignment_service
        .assign_taluka_to_salesman(&actor, user_id, payload.taluka.as_str(), city_hint)
        .await?;

    Ok(Json(AssignmentResponse::from(assignment)))
}

pub async fn revoke_assignment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((role, user_id)): Path<(String, String)>,
) -> ApiResult<Json<RevokeAssignmentResponse>> {
    let role = Role::from_transport(role.as_str())?;
    let user_id = UserId::from_str(user_id.as_str())?;

    state
        .delegation_guard
        .ensure_can_delegate(&actor, &DelegationRequest::Revoke { user_id, role })
        .await?;

    let removed = state
        .assignment_service
        .revoke_assignment(&actor, user_id, role)
        .await?;

    Ok(Json(RevokeAssignmentResponse { removed }))
}
