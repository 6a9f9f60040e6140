pub mod health;
pub mod property;
pub mod reservation;
pub mod root;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// API routes without the transport layers added in `main`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route(
            "/properties",
            get(property::get_properties).post(property::create_property),
        )
        .route(
            "/properties/{id}",
            get(property::get_property_by_id)
                .put(property::update_property)
                .delete(property::delete_property),
        )
        .route("/reservations", post(reservation::create_reservation))
        .route("/reservations/{id}", get(reservation::get_reservation_by_id))
        .route(
            "/reservations/by-property/{property_id}",
            get(reservation::get_reservations_by_property),
        )
        .with_state(state)
}
