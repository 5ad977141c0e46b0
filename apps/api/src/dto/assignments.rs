use geoscope_application::AssignableUser;
use geoscope_domain::Assignment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload granting cities to a Sub-General.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-sub-general-cities-request.ts"
)]
pub struct AssignSubGeneralCitiesRequest {
    pub cities: Vec<String>,
}

/// Incoming payload granting talukas of one city to an HR-General.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-hr-general-talukas-request.ts"
)]
pub struct AssignHrGeneralTalukasRequest {
    pub city: String,
    pub talukas: Vec<String>,
}

/// Incoming payload granting one taluka to a Salesman.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-salesman-taluka-request.ts"
)]
pub struct AssignSalesmanTalukaRequest {
    pub taluka: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// Query parameters for assignment listings.
#[derive(Debug, Deserialize)]
pub struct AssignmentListQuery {
    pub role: String,
    pub city: Option<String>,
    pub taluka: Option<String>,
}

/// API representation of a stored assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-response.ts"
)]
pub struct AssignmentResponse {
    pub user_id: String,
    pub role: String,
    pub assigned_cities: Vec<String>,
    pub assigned_talukas: Vec<String>,
    pub updated_at: String,
}

/// Directory user together with the current assignment for the listed role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignable-user-response.ts"
)]
pub struct AssignableUserResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: String,
    pub assignment: Option<AssignmentResponse>,
}

/// Outcome of an assignment removal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/revoke-assignment-response.ts"
)]
pub struct RevokeAssignmentResponse {
    pub removed: bool,
}

impl From<Assignment> for AssignmentResponse {
    fn from(value: Assignment) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            role: value.role().as_str().to_owned(),
            assigned_cities: value.assigned_cities().to_vec(),
            assigned_talukas: value.assigned_talukas().to_vec(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

impl From<AssignableUser> for AssignableUserResponse {
    fn from(value: AssignableUser) -> Self {
        Self {
            user_id: value.user.user_id.to_string(),
            display_name: value.user.display_name,
            email: value.user.email,
            role: value.user.role.as_str().to_owned(),
            assignment: value.assignment.map(AssignmentResponse::from),
        }
    }
}
