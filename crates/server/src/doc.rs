use crate::routes::{health, property, reservation, root};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        property::get_properties,
        property::get_property_by_id,
        property::create_property,
        property::update_property,
        property::delete_property,
        reservation::create_reservation,
        reservation::get_reservation_by_id,
        reservation::get_reservations_by_property
    ),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Properties", description = "Rental property management"),
        (name = "Reservations", description = "Bookings against a property"),
    ),
    info(
        title = "Rental Properties API",
        version = "1.0.0",
        description = "Manage rental properties and their reservations",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
