use geoscope_domain::GeoTagged;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Geo-tagged record passed through the permission filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/geo-record-payload.ts"
)]
pub struct GeoRecordPayload {
    pub id: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub taluka: Option<String>,
}

impl GeoTagged for GeoRecordPayload {
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn taluka(&self) -> Option<&str> {
        self.taluka.as_deref()
    }
}

/// Incoming payload for bulk visibility filtering.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/filter-records-request.ts"
)]
pub struct FilterRecordsRequest {
    pub records: Vec<GeoRecordPayload>,
}

/// Records the caller may view, in input order.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/filter-records-response.ts"
)]
pub struct FilterRecordsResponse {
    pub records: Vec<GeoRecordPayload>,
}

/// Incoming payload for a single-record visibility check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-request.ts"
)]
pub struct AccessCheckRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub taluka: Option<String>,
}

/// Single-record visibility decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub allowed: bool,
}
