pub mod price;
pub mod property_status;
pub mod reservation_status;
pub mod stay;

pub use price::{MAX_PRICE, fits_price_column};
pub use property_status::PropertyStatus;
pub use reservation_status::ReservationStatus;
pub use stay::{InvalidStay, Stay};
