//! Guest record extraction
//!
//! Reads the first worksheet of a PMS export, skips the title block, stops at
//! the end-of-data marker and validates each remaining row. Invalid rows are
//! dropped and recorded; only an unreadable file fails the extraction.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use thirdnight_core::{ExportLayout, ExtractError, GuestList, GuestStay, RowError};
use tracing::{debug, info, warn};

use crate::export::{cell_text, ExportRow};

/// A validated stay with its display position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestRecord {
    /// 1-based position after sorting by room; display only
    pub index: usize,
    /// Zero-based row in the source worksheet
    pub source_row: u32,
    pub stay: GuestStay,
}

/// A row that was dropped during validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedRow {
    pub source_row: u32,
    pub error: RowError,
}

/// Result of an extraction run
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// Stays keyed by room, later rows winning on duplicate rooms
    pub guests: GuestList,
    /// Every valid row sorted by room, duplicates included
    pub records: Vec<GuestRecord>,
    /// Rows rejected by validation, in source order
    pub dropped: Vec<DroppedRow>,
    /// Source row holding the end-of-data marker, if one was found
    pub end_marker_row: Option<u32>,
}

impl Extraction {
    /// Number of distinct rooms loaded
    pub fn room_count(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

/// Extracts guest stays from PMS in-house guest exports
#[derive(Clone, Debug, Default)]
pub struct GuestRecordExtractor {
    layout: ExportLayout,
}

impl GuestRecordExtractor {
    pub fn new(layout: ExportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    /// Extract guest stays from raw spreadsheet bytes (xls or xlsx)
    pub fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractError> {
        let range = read_first_sheet(bytes)?;
        Ok(self.extract_range(&range))
    }

    /// Extract guest stays from an already loaded worksheet
    pub fn extract_range(&self, range: &Range<Data>) -> Extraction {
        let (rows, end_marker_row) = self.read_rows(range);
        let mut extraction = self.build(rows);
        extraction.end_marker_row = end_marker_row;
        extraction
    }

    /// Lift the data rows of a worksheet into export rows.
    ///
    /// Rows before `skip_rows` are ignored; reading stops at the first row
    /// whose marker column contains the end marker. Positions are absolute,
    /// so leading blank rows and columns in the sheet do not shift anything.
    pub fn read_rows(&self, range: &Range<Data>) -> (Vec<ExportRow>, Option<u32>) {
        let Some((last_row, _)) = range.end() else {
            return (Vec::new(), None);
        };

        let mut rows = Vec::new();
        for row in self.layout.skip_rows..=last_row {
            let cell = |col: u16| range.get_value((row, u32::from(col)));

            let is_marker = cell(self.layout.end_marker_column)
                .and_then(cell_text)
                .is_some_and(|text| text.contains(&self.layout.end_marker));
            if is_marker {
                debug!(row, marker = %self.layout.end_marker, "end of guest rows");
                return (rows, Some(row));
            }

            rows.push(ExportRow::from_cells(row, &self.layout, cell));
        }
        (rows, None)
    }

    /// Validate, sort and key export rows
    pub fn build(&self, rows: Vec<ExportRow>) -> Extraction {
        let mut extraction = Extraction::default();
        let mut valid: Vec<(u32, GuestStay)> = Vec::with_capacity(rows.len());

        for row in rows {
            match row.parse(&self.layout) {
                Ok(stay) => valid.push((row.source_row, stay)),
                Err(error) => {
                    // Placeholder rows are routine; everything else is worth a trace
                    if error != RowError::SentinelRoom {
                        debug!(row = row.source_row, %error, "dropping export row");
                    }
                    extraction.dropped.push(DroppedRow {
                        source_row: row.source_row,
                        error,
                    });
                }
            }
        }

        // Stable: duplicate rooms keep source order, so the later row wins below
        valid.sort_by_key(|(_, stay)| stay.room_number);

        for (i, (source_row, stay)) in valid.into_iter().enumerate() {
            if let Some(previous) = extraction.guests.insert(stay.clone()) {
                debug!(
                    room = stay.room_number,
                    replaced = %previous.guest_name,
                    by = %stay.guest_name,
                    "duplicate room, keeping later row"
                );
            }
            extraction.records.push(GuestRecord {
                index: i + 1,
                source_row,
                stay,
            });
        }

        if extraction.guests.is_empty() {
            warn!("no valid guest records in export");
        } else {
            info!(
                rooms = extraction.guests.len(),
                dropped = extraction.dropped.len(),
                "loaded guest records"
            );
        }
        extraction
    }
}

/// Open spreadsheet bytes and load the first worksheet
pub fn read_first_sheet(bytes: &[u8]) -> Result<Range<Data>, ExtractError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ExtractError::InputFormat(e.to_string()))?;

    workbook
        .worksheet_range_at(0)
        .ok_or(ExtractError::NoWorksheet)?
        .map_err(|e| ExtractError::InputFormat(e.to_string()))
}
