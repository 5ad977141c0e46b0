use super::*;

pub async fn get_assignment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((role, user_id)): Path<(String, String)>,
) -> ApiResult<Json<AssignmentResponse>> {
    let role = Role::from_transport(role.as_str())?;
    let user_id = UserId::from_str(user_id.as_str())?;

    if user_id != actor.user_id() {
        ensure_outranks(&actor, role)?;
    }

    let assignment = state
        .assignment_service
        .find_assignment(user_id, role)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("no {role} assignment recorded for user '{user_id}'"))
        })?;

    Ok(Json(AssignmentResponse::from(assignment)))
}

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<AssignmentListQuery>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let role = Role::from_transport(query.role.as_str())?;
    ensure_outranks(&actor, role)?;

    let city = query.city.as_deref().filter(|city| !city.trim().is_empty());
    let taluka = query
        .taluka
        .as_deref()
        .filter(|taluka| !taluka.trim().is_empty());

    let assignments = match (role, city, taluka) {
        (_, None, None) => state.assignment_service.list_assignments(role).await?,
        (Role::HrGeneral, Some(city), None) => {
            state.assignment_service.hr_generals_in_city(city).await?
        }
        (Role::Salesman, city, Some(taluka)) => {
            state
                .assignment_service
                .salesmen_in_taluka(taluka, city)
                .await?
        }
        _ => {
            return Err(AppError::Validation(
                "city filter applies to hr_general listings, taluka filter to salesman listings"
                    .to_owned(),
            )
            .into());
        }
    };

    Ok(Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    ))
}

pub async fn my_assignments_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let assignments = state
        .assignment_service
        .list_user_assignments(actor.user_id())
        .await?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}
