use serde::Serialize;
use ts_rs::TS;

/// Catalog city with its talukas.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/city-response.ts"
)]
pub struct CityResponse {
    pub name: String,
    pub talukas: Vec<String>,
}

/// Talukas of one requested city.
///
/// `city` carries the catalog spelling when the city is known, otherwise the
/// requested value with an empty taluka list.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/city-talukas-response.ts"
)]
pub struct CityTalukasResponse {
    pub city: String,
    pub known: bool,
    pub talukas: Vec<String>,
}
