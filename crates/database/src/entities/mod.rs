pub mod properties;
pub mod reservations;
