use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/venues", get(handlers::venues::list_venues))
        .route("/api/venues/:id", get(handlers::venues::get_venue))
        .route("/api/venues/:id/slots", get(handlers::venues::get_slots))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/current",
            get(handlers::bookings::current_booking),
        )
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:id/complete",
            post(handlers::bookings::complete_booking),
        )
        .route("/api/me/bookings", get(handlers::bookings::my_bookings))
        .route(
            "/api/teams",
            get(handlers::teams::list_teams).post(handlers::teams::create_team),
        )
        .route("/api/teams/:id", get(handlers::teams::get_team))
        .route("/api/teams/:id/join", post(handlers::teams::join_team))
        .route("/api/me/teams", get(handlers::teams::my_teams))
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/venues", post(handlers::admin::create_venue))
        .route(
            "/api/admin/venues/:id",
            put(handlers::admin::update_venue).delete(handlers::admin::delete_venue),
        )
        .route(
            "/api/admin/bookings",
            get(handlers::admin::get_bookings).post(handlers::admin::create_booking),
        )
        .route(
            "/api/admin/bookings/:id/status",
            post(handlers::admin::set_booking_status),
        )
        .with_state(state)
}
