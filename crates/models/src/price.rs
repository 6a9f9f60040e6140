use rust_decimal::Decimal;

/// Decimal places kept for every stored price
pub const PRICE_SCALE: u32 = 2;

/// Largest value of a `numeric(10, 2)` price column, 99999999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, PRICE_SCALE);

/// Whether a price is stored as-is, without rounding or overflowing its column
pub fn fits_price_column(price: Decimal) -> bool {
    price.normalize().scale() <= PRICE_SCALE && price.abs() <= MAX_PRICE
}
