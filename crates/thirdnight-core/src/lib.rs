//! # thirdnight-core
//!
//! Core domain model for the thirdnight housekeeping roster generator.
//!
//! This crate provides:
//! - Domain types: `GuestStay`, `GuestList`
//! - The every-third-night housekeeping rule (`schedule`)
//! - Injected configuration: `RoomGrid`, `ExportLayout`, `ReportConfig`
//! - The rendered roster contract (`Roster`) and the `Renderer` trait
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use thirdnight_core::{GuestList, GuestStay};
//!
//! let mut guests = GuestList::new();
//! guests.insert(GuestStay::new(
//!     105,
//!     "Rivera, Ana",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//! ));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let due: Vec<_> = guests.due_on(today).map(|s| s.room_number).collect();
//! assert_eq!(due, vec![105]);
//! ```

pub mod config;
pub mod roster;
pub mod schedule;

pub use config::{Block, ExportLayout, GridSlot, ReportConfig, RoomGrid};
pub use roster::{Cell, CellBorder, CellStyle, CellValue, HorizontalAlign, Orientation, Roster};
pub use schedule::{housekeeping_dates, is_due_on, is_due_today, HousekeepingDates, HOUSEKEEPING_INTERVAL_DAYS};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Room number as printed on the door (e.g. 105, 226)
pub type RoomNumber = u32;

/// Placeholder room used for blank or invalid room codes before they are dropped
pub const SENTINEL_ROOM: RoomNumber = 0;

// ============================================================================
// Guest Stay
// ============================================================================

/// One in-house guest's stay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestStay {
    /// Room number, unique within a report run
    pub room_number: RoomNumber,
    /// Guest name as exported (may be empty)
    pub guest_name: String,
    /// Arrival date
    pub arrival: NaiveDate,
    /// Departure date
    pub departure: NaiveDate,
}

impl GuestStay {
    pub fn new(
        room_number: RoomNumber,
        guest_name: impl Into<String>,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> Self {
        Self {
            room_number,
            guest_name: guest_name.into(),
            arrival,
            departure,
        }
    }

    /// Number of nights booked (negative for inverted stays)
    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }

    /// Dates on which this stay is due for service
    pub fn housekeeping_dates(&self) -> HousekeepingDates {
        housekeeping_dates(self.arrival, self.departure)
    }

    /// Whether the room is due for service on `today`'s calendar date
    pub fn is_due_today(&self, today: NaiveDateTime) -> bool {
        is_due_today(self.arrival, self.departure, today)
    }

    /// Whether the room is due for service on `date`
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        is_due_on(self.arrival, self.departure, date)
    }
}

// ============================================================================
// Guest List
// ============================================================================

/// Guest stays keyed by room number, ordered ascending.
///
/// A room holds at most one stay: inserting a stay for an occupied room
/// replaces the earlier one (last write wins).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestList {
    stays: BTreeMap<RoomNumber, GuestStay>,
}

impl GuestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stay, returning the stay it replaced if the room was taken
    pub fn insert(&mut self, stay: GuestStay) -> Option<GuestStay> {
        self.stays.insert(stay.room_number, stay)
    }

    /// Get the stay for a room
    pub fn get(&self, room: RoomNumber) -> Option<&GuestStay> {
        self.stays.get(&room)
    }

    pub fn contains(&self, room: RoomNumber) -> bool {
        self.stays.contains_key(&room)
    }

    /// Number of occupied rooms
    pub fn len(&self) -> usize {
        self.stays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stays.is_empty()
    }

    /// Stays in ascending room order
    pub fn iter(&self) -> btree_map::Values<'_, RoomNumber, GuestStay> {
        self.stays.values()
    }

    /// Occupied room numbers in ascending order
    pub fn rooms(&self) -> impl Iterator<Item = RoomNumber> + '_ {
        self.stays.keys().copied()
    }

    /// Stays due for service on `date`, in ascending room order
    pub fn due_on(&self, date: NaiveDate) -> impl Iterator<Item = &GuestStay> + '_ {
        self.stays.values().filter(move |s| s.is_due_on(date))
    }
}

impl FromIterator<GuestStay> for GuestList {
    fn from_iter<I: IntoIterator<Item = GuestStay>>(iter: I) -> Self {
        let mut list = Self::new();
        for stay in iter {
            list.insert(stay);
        }
        list
    }
}

impl<'a> IntoIterator for &'a GuestList {
    type Item = &'a GuestStay;
    type IntoIter = btree_map::Values<'a, RoomNumber, GuestStay>;

    fn into_iter(self) -> Self::IntoIter {
        self.stays.values()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering of a laid-out roster
pub trait Renderer {
    type Output;

    /// Render the roster to the output format
    fn render(&self, roster: &Roster) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Which date column of an export row failed to parse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateField {
    Arrival,
    Departure,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Arrival => write!(f, "arrival"),
            DateField::Departure => write!(f, "departure"),
        }
    }
}

/// File-level extraction failure; aborts the whole run
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Input is not a readable spreadsheet: {0}")]
    InputFormat(String),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,
}

/// Row-level parse failure; the row is dropped and the run continues.
///
/// Blank room codes count as the placeholder room and report `SentinelRoom`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Placeholder room 0")]
    SentinelRoom,

    #[error("Invalid room code: {0}")]
    InvalidRoom(String),

    #[error("Invalid {field} date: {value:?}")]
    InvalidDate { field: DateField, value: String },
}

/// Invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Room {0} appears more than once in the room grid")]
    DuplicateRoom(RoomNumber),

    #[error("Room grid contains placeholder room 0")]
    SentinelRoom,

    #[error("Invalid export layout: {0}")]
    InvalidLayout(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
