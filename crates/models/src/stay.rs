use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Error returned when a stay does not end after it starts
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvalidStay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Display for InvalidStay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "checkOut ({}) must be after checkIn ({})",
            self.check_out, self.check_in
        )
    }
}

impl std::error::Error for InvalidStay {}

/// A requested or booked date range at a property.
///
/// A `Stay` always ends at least one day after it starts, so `nights()` is
/// never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStay> {
        if check_out <= check_in {
            return Err(InvalidStay {
                check_in,
                check_out,
            });
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of whole nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Price of the whole stay for the given nightly rate, `None` on overflow
    pub fn total_price(&self, nightly_price: Decimal) -> Option<Decimal> {
        nightly_price.checked_mul(Decimal::from(self.nights()))
    }

    /// Whether two stays share at least one day.
    ///
    /// Both ends are inclusive: a stay checking out on the day another
    /// checks in counts as an overlap, so same-day turnover is rejected.
    pub fn overlaps(&self, other: &Stay) -> bool {
        other.check_out >= self.check_in && other.check_in <= self.check_out
    }
}

impl Display for Stay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}, {}]", self.check_in, self.check_out)
    }
}
