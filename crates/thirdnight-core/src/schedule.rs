//! Every-third-night housekeeping rule
//!
//! A stay is serviced on every date that lies a whole multiple of
//! [`HOUSEKEEPING_INTERVAL_DAYS`] nights after arrival and strictly before
//! departure:
//!
//! ```text
//! arrival      +3        +6        +9   departure
//!    |---------X---------X---------X-------|
//! ```
//!
//! Stays shorter than three nights are never serviced. Only calendar dates
//! are compared; no timezone handling is applied.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::iter::FusedIterator;

/// Nights between housekeeping visits
pub const HOUSEKEEPING_INTERVAL_DAYS: i64 = 3;

/// Iterator over the housekeeping dates of a single stay.
///
/// Created by [`housekeeping_dates`]. Cloning yields an independent iterator
/// starting from the same position.
#[derive(Clone, Debug)]
pub struct HousekeepingDates {
    next: Option<NaiveDate>,
    departure: NaiveDate,
}

impl Iterator for HousekeepingDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current >= self.departure {
            self.next = None;
            return None;
        }
        self.next = current.checked_add_signed(Duration::days(HOUSEKEEPING_INTERVAL_DAYS));
        Some(current)
    }
}

impl FusedIterator for HousekeepingDates {}

/// Dates on which a stay from `arrival` to `departure` is due for service:
/// `arrival + 3`, `arrival + 6`, … while the date is before `departure`.
pub fn housekeeping_dates(arrival: NaiveDate, departure: NaiveDate) -> HousekeepingDates {
    HousekeepingDates {
        next: arrival.checked_add_signed(Duration::days(HOUSEKEEPING_INTERVAL_DAYS)),
        departure,
    }
}

/// Whether the stay is due for service on `today`. Time of day is ignored.
pub fn is_due_today(arrival: NaiveDate, departure: NaiveDate, today: NaiveDateTime) -> bool {
    is_due_on(arrival, departure, today.date())
}

/// Whether the stay is due for service on `date`
pub fn is_due_on(arrival: NaiveDate, departure: NaiveDate, date: NaiveDate) -> bool {
    housekeeping_dates(arrival, departure)
        .take_while(|d| *d <= date)
        .any(|d| d == date)
}
