pub mod property;
pub mod reservation;
