//! Typed row schema of the PMS export
//!
//! Each source row is first lifted into an [`ExportRow`] holding only the four
//! columns the report uses, then validated field by field into a
//! [`GuestStay`]. Any field failure rejects the whole row with a [`RowError`].

use calamine::Data;
use chrono::NaiveDate;
use thirdnight_core::{DateField, ExportLayout, GuestStay, RoomNumber, RowError, SENTINEL_ROOM};

/// Date cell as found in the export
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawDate {
    /// Text to be parsed with the export's date format
    Text(String),
    /// Native spreadsheet date
    Date(NaiveDate),
    Missing,
}

/// One source row, reduced to the columns the report uses
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    /// Zero-based row in the source worksheet
    pub source_row: u32,
    pub room_code: Option<String>,
    pub guest_name: String,
    pub arrival: RawDate,
    pub departure: RawDate,
}

impl ExportRow {
    /// Lift a row out of worksheet cells. `cell` returns the cell at a
    /// zero-based source column, or `None` past the end of the data.
    pub fn from_cells<'a>(
        source_row: u32,
        layout: &ExportLayout,
        cell: impl Fn(u16) -> Option<&'a Data>,
    ) -> Self {
        Self {
            source_row,
            room_code: cell(layout.room_column).and_then(cell_text),
            guest_name: cell(layout.guest_name_column)
                .and_then(cell_text)
                .unwrap_or_default(),
            arrival: cell(layout.arrival_column).map_or(RawDate::Missing, cell_date),
            departure: cell(layout.departure_column).map_or(RawDate::Missing, cell_date),
        }
    }

    /// Validate the row into a guest stay
    pub fn parse(&self, layout: &ExportLayout) -> Result<GuestStay, RowError> {
        let room = parse_room_code(self.room_code.as_deref(), layout.room_separator)?;
        let arrival = parse_date(&self.arrival, &layout.date_format, DateField::Arrival)?;
        let departure = parse_date(&self.departure, &layout.date_format, DateField::Departure)?;
        Ok(GuestStay::new(room, self.guest_name.clone(), arrival, departure))
    }
}

/// Room number from a room code such as `105-KNG`.
///
/// Blank codes count as the placeholder room and are rejected like it.
pub fn parse_room_code(code: Option<&str>, separator: char) -> Result<RoomNumber, RowError> {
    let code = code.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("0");
    let number = code.split(separator).next().unwrap_or(code).trim();
    let room: RoomNumber = number
        .parse()
        .map_err(|_| RowError::InvalidRoom(code.to_string()))?;
    if room == SENTINEL_ROOM {
        return Err(RowError::SentinelRoom);
    }
    Ok(room)
}

/// Calendar date of a date cell.
///
/// Text must start with a date in `format`; a trailing time of day after
/// whitespace is ignored.
pub fn parse_date(raw: &RawDate, format: &str, field: DateField) -> Result<NaiveDate, RowError> {
    let invalid = |value: &str| RowError::InvalidDate {
        field,
        value: value.to_string(),
    };
    match raw {
        RawDate::Date(date) => Ok(*date),
        RawDate::Missing => Err(invalid("")),
        RawDate::Text(text) => {
            let text = text.trim();
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return Ok(date);
            }
            match NaiveDate::parse_and_remainder(text, format) {
                Ok((date, rest)) if rest.starts_with(char::is_whitespace) => Ok(date),
                _ => Err(invalid(text)),
            }
        }
    }
}

/// Text content of a cell, `None` when blank
pub(crate) fn cell_text(data: &Data) -> Option<String> {
    let text = match data {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => n.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(_) | Data::Empty => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn cell_date(data: &Data) -> RawDate {
    match data {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(RawDate::Missing, |d| RawDate::Date(d.date())),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map_or_else(|| RawDate::Text(s.clone()), RawDate::Date),
        other => cell_text(other).map_or(RawDate::Missing, RawDate::Text),
    }
}
