use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};

use geoscope_application::{Actor, DelegationRequest};
use geoscope_core::AppError;
use geoscope_domain::{Role, UserId};

use crate::dto::{
    AssignHrGeneralTalukasRequest, AssignSalesmanTalukaRequest, AssignSubGeneralCitiesRequest,
    AssignmentListQuery, AssignmentResponse, RevokeAssignmentResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::ensure_outranks;

mod grants;
mod reads;

pub use grants::{
    assign_hr_general_talukas_handler, assign_salesman_taluka_handler,
    assign_sub_general_cities_handler, revoke_assignment_handler,
};
pub use reads::{get_assignment_handler, list_assignments_handler, my_assignments_handler};
