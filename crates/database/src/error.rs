use sea_orm::DbErr;
use thiserror::Error;

/// Failures of the property and reservation workflows
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Property not found with id={0}")]
    PropertyNotFound(i64),

    #[error("Reservation not found with id={0}")]
    ReservationNotFound(i64),

    #[error("checkOut must be after checkIn")]
    InvalidDateRange,

    #[error("Total price of the stay exceeds {}", models::MAX_PRICE)]
    TotalPriceTooLarge,

    #[error("There is already a reservation for this property in the selected period.")]
    BookingConflict,

    #[error("Property {0} still has reservations and can't be deleted")]
    PropertyHasReservations(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
