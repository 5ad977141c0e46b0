mod access;
mod assignments;
mod common;
mod geo;

pub use access::{
    AccessCheckRequest, AccessCheckResponse, FilterRecordsRequest, FilterRecordsResponse,
    GeoRecordPayload,
};
pub use assignments::{
    AssignHrGeneralTalukasRequest, AssignSalesmanTalukaRequest, AssignSubGeneralCitiesRequest,
    AssignableUserResponse, AssignmentListQuery, AssignmentResponse, RevokeAssignmentResponse,
};
pub use common::HealthResponse;
pub use geo::{CityResponse, CityTalukasResponse};
