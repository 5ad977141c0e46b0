use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{CityResponse, CityTalukasResponse};
use crate::state::AppState;

pub async fn list_cities_handler(State(state): State<AppState>) -> Json<Vec<CityResponse>> {
    let cities = state
        .catalog
        .all_cities()
        .into_iter()
        .map(|city| CityResponse {
            name: city.to_owned(),
            talukas: state.catalog.talukas_of(city).to_vec(),
        })
        .collect();

    Json(cities)
}

pub async fn city_talukas_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Json<CityTalukasResponse> {
    let response = match state.catalog.resolve_city(city.as_str()) {
        Some(canonical) => CityTalukasResponse {
            city: canonical.to_owned(),
            known: true,
            talukas: state.catalog.talukas_of(canonical).to_vec(),
        },
        None => CityTalukasResponse {
            city,
            known: false,
            talukas: Vec::new(),
        },
    };

    Json(response)
}
