//! # thirdnight-parser
//!
//! Guest record extraction from PMS "In House Guests" exports.
//!
//! This crate provides:
//! - A typed row schema for the export (`ExportRow`) with per-field validation
//! - `GuestRecordExtractor`: spreadsheet bytes → sorted, room-keyed guest stays
//!
//! Both legacy `.xls` and `.xlsx` exports are accepted; the format is detected
//! from the bytes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use thirdnight_parser::extract_guests;
//!
//! let bytes = std::fs::read("In_House_Guests.xls")?;
//! let extraction = extract_guests(&bytes)?;
//! println!("Loaded {} guest records", extraction.room_count());
//! ```

pub mod export;
pub mod extract;

pub use export::{parse_date, parse_room_code, ExportRow, RawDate};
pub use extract::{read_first_sheet, DroppedRow, Extraction, GuestRecord, GuestRecordExtractor};

use thirdnight_core::ExtractError;

/// Extract guest stays using the default export layout
pub fn extract_guests(bytes: &[u8]) -> Result<Extraction, ExtractError> {
    GuestRecordExtractor::default().extract(bytes)
}
