//! Due-today summary
//!
//! The on-screen companion to the roster: how many rooms were loaded and which
//! of them need service today. Grid membership plays no part here, so a stay
//! left off the roster is still listed when it is due.

use chrono::{NaiveDate, NaiveDateTime};
use thirdnight_core::{GuestList, RoomNumber};

/// A room needing service today
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueRoom {
    /// 1-based position in the due list; display only
    pub position: usize,
    pub room: RoomNumber,
    pub guest_name: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
}

/// Record count and due-today list of one report run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DueSummary {
    /// Distinct rooms loaded from the export
    pub record_count: usize,
    /// Due rooms in ascending room order
    pub due: Vec<DueRoom>,
}

impl DueSummary {
    /// Summarize `guests` for the calendar date of `today`
    pub fn new(guests: &GuestList, today: NaiveDateTime) -> Self {
        let due = guests
            .iter()
            .filter(|stay| stay.is_due_today(today))
            .enumerate()
            .map(|(i, stay)| DueRoom {
                position: i + 1,
                room: stay.room_number,
                guest_name: stay.guest_name.clone(),
                arrival: stay.arrival,
                departure: stay.departure,
            })
            .collect();

        Self {
            record_count: guests.len(),
            due,
        }
    }

    pub fn due_count(&self) -> usize {
        self.due.len()
    }

    pub fn nothing_due(&self) -> bool {
        self.due.is_empty()
    }

    pub fn due_rooms(&self) -> impl Iterator<Item = RoomNumber> + '_ {
        self.due.iter().map(|d| d.room)
    }
}
