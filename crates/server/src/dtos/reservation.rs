use super::not_blank;
use chrono::NaiveDate;
use database::{
    entities::{properties, reservations},
    services::reservation::NewReservation,
};
use models::ReservationStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub property_id: i64,

    #[validate(custom(function = "not_blank"), length(max = 120))]
    pub guest_name: String,

    #[validate(email, length(max = 180))]
    pub guest_email: String,

    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<ReservationRequest> for NewReservation {
    fn from(request: ReservationRequest) -> Self {
        Self {
            property_id: request.property_id,
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            check_in: request.check_in,
            check_out: request.check_out,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub property_id: i64,
    pub property_title: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[schema(value_type = String, example = "BOOKED")]
    pub status: ReservationStatus,
}

impl ReservationResponse {
    pub fn new(reservation: reservations::Model, property: &properties::Model) -> Self {
        Self {
            id: reservation.id,
            property_id: reservation.property_id,
            property_title: property.title.clone(),
            guest_name: reservation.guest_name,
            guest_email: reservation.guest_email,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            total_price: reservation.total_price,
            status: reservation.status,
        }
    }
}
