use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/geo/cities", get(handlers::geo::list_cities_handler))
        .route(
            "/api/geo/cities/{city}/talukas",
            get(handlers::geo::city_talukas_handler),
        )
        .route(
            "/api/sub-generals/{user_id}/cities",
            put(handlers::assignments::assign_sub_general_cities_handler),
        )
        .route(
            "/api/hr-generals/{user_id}/talukas",
            put(handlers::assignments::assign_hr_general_talukas_handler),
        )
        .route(
            "/api/salesmen/{user_id}/taluka",
            put(handlers::assignments::assign_salesman_taluka_handler),
        )
        .route(
            "/api/assignments",
            get(handlers::assignments::list_assignments_handler),
        )
        .route(
            "/api/assignments/{role}/{user_id}",
            get(handlers::assignments::get_assignment_handler)
                .delete(handlers::assignments::revoke_assignment_handler),
        )
        .route(
            "/api/me/assignments",
            get(handlers::assignments::my_assignments_handler),
        )
        .route(
            "/api/directory/{role}/assignable",
            get(handlers::directory::assignable_users_handler),
        )
        .route(
            "/api/access/filter",
            post(handlers::access::filter_records_handler),
        )
        .route(
            "/api/access/check",
            post(handlers::access::check_access_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests;
