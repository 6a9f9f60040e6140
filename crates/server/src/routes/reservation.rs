use crate::{
    dtos::reservation::{ReservationRequest, ReservationResponse},
    error::ApiError,
    extract::{Json, Path},
    routes::AppState,
};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use database::{ServiceError, services::reservation::ReservationService};
use validator::Validate;

/// Book a stay at a property
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse,
            headers(("Location" = String, description = "URL of the new reservation"))),
        (status = 400, description = "Unknown property, invalid dates, overlapping reservation or invalid guest data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    // The property id is part of the request body, so a missing one is a bad request
    let (reservation, property) =
        ReservationService::create_reservation(&state.db, request.into())
            .await
            .map_err(|e| match e {
                ServiceError::PropertyNotFound(_) => ApiError::BadRequest(e.to_string()),
                e => e.into(),
            })?;

    let location = format!("/reservations/{}", reservation.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ReservationResponse::new(reservation, &property)),
    ))
}

/// Get a specific reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation found", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reservations"
)]
pub async fn get_reservation_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let (reservation, property) = ReservationService::find_by_id(&state.db, id).await?;
    Ok(Json(ReservationResponse::new(reservation, &property)))
}

/// List the reservations of a property
#[utoipa::path(
    get,
    path = "/reservations/by-property/{property_id}",
    params(
        ("property_id" = i64, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Reservations of the property", body = Vec<ReservationResponse>),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reservations"
)]
pub async fn get_reservations_by_property(
    State(state): State<AppState>,
    Path(property_id): Path<i64>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let (property, reservations) =
        ReservationService::list_by_property(&state.db, property_id).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(|reservation| ReservationResponse::new(reservation, &property))
            .collect(),
    ))
}
