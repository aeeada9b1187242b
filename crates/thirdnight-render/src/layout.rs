//! Roster layout
//!
//! Places guest stays on the two-block housekeeping sheet:
//!
//! ```text
//!        A       B                C       D       E     F   G       H ...
//!   1            GUEST LIST DATE: 2024-01-07
//!   2
//!   3  ROOM    GUEST NAME       ARRIVE  DEPART  HSK       ROOM    GUEST NAME ...
//!   4  105     Moreau, Luc      2024-.. 2024-.. X         222
//!   5  106                                                223     Haddad, Omar ...
//! ```
//!
//! Every grid room gets a row even when vacant. Stays for rooms that are not
//! on the grid are left off the sheet.

use chrono::{NaiveDate, NaiveDateTime};
use thirdnight_core::{
    Block, CellBorder, CellStyle, GuestList, GuestStay, HorizontalAlign, Orientation, RoomGrid,
    Roster,
};
use tracing::debug;

/// Row holding the stamp date label
pub const TITLE_ROW: u32 = 0;
/// Row holding the column headers
pub const HEADER_ROW: u32 = 2;
/// Row of the first room in each block
pub const FIRST_ROOM_ROW: u32 = 3;
/// Columns per block
pub const BLOCK_WIDTH: u16 = 5;
/// Narrow column separating the two blocks
pub const SPACER_COLUMN: u16 = BLOCK_WIDTH;
/// Total columns on the sheet
pub const SHEET_COLUMNS: u16 = BLOCK_WIDTH * 2 + 1;

pub const STAMP_LABEL: &str = "GUEST LIST DATE:";
pub const DUE_MARKER: &str = "X";
/// Date format of every date printed on the roster
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const ROW_HEIGHT: f64 = 14.5;
const SPACER_WIDTH: f64 = 3.0;

/// A column within one block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Room,
    GuestName,
    Arrival,
    Departure,
    Housekeeping,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Room,
        Column::GuestName,
        Column::Arrival,
        Column::Departure,
        Column::Housekeeping,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Room => "ROOM",
            Column::GuestName => "GUEST NAME",
            Column::Arrival => "ARRIVE",
            Column::Departure => "DEPART",
            Column::Housekeeping => "HSK",
        }
    }

    /// Width in character units
    pub fn width(self) -> f64 {
        match self {
            Column::Room => 7.0,
            Column::GuestName => 21.0,
            Column::Arrival | Column::Departure | Column::Housekeeping => 10.0,
        }
    }

    fn offset(self) -> u16 {
        match self {
            Column::Room => 0,
            Column::GuestName => 1,
            Column::Arrival => 2,
            Column::Departure => 3,
            Column::Housekeeping => 4,
        }
    }
}

/// Zero-based sheet column of `column` in `block`
pub fn column_index(block: Block, column: Column) -> u16 {
    let start = match block {
        Block::Left => 0,
        Block::Right => SPACER_COLUMN + 1,
    };
    start + column.offset()
}

/// Zero-based sheet row of the room at `position` in its block
pub fn room_row(position: usize) -> u32 {
    FIRST_ROOM_ROW + position as u32
}

/// Lays guest stays out on the room grid
#[derive(Clone, Debug, Default)]
pub struct RosterLayoutEngine {
    grid: RoomGrid,
}

impl RosterLayoutEngine {
    pub fn new(grid: RoomGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    /// Build the roster for `guests`.
    ///
    /// `today` decides which rooms are marked due; `stamp` is the date printed
    /// in the title row.
    pub fn layout(&self, guests: &GuestList, today: NaiveDateTime, stamp: NaiveDate) -> Roster {
        let mut roster = Roster::new();
        roster.orientation = Orientation::Landscape;
        roster.column_widths = Block::ALL
            .iter()
            .flat_map(|_| Column::ALL.map(Column::width))
            .collect();
        roster.column_widths.insert(usize::from(SPACER_COLUMN), SPACER_WIDTH);

        let last_row = HEADER_ROW + self.grid.row_count() as u32;
        for row in 1..=last_row {
            roster.row_heights.insert(row, ROW_HEIGHT);
        }
        Self::draw_grid(&mut roster, last_row);
        Self::write_title(&mut roster, stamp);
        Self::write_headers(&mut roster);

        let mut due = 0usize;
        for block in Block::ALL {
            for (position, &room) in self.grid.block(block).iter().enumerate() {
                let row = room_row(position);
                roster.set_value(row, column_index(block, Column::Room), room);
                roster.style_mut(row, column_index(block, Column::Room)).bold = true;

                if let Some(stay) = guests.get(room) {
                    if Self::write_stay(&mut roster, block, row, stay, today) {
                        due += 1;
                    }
                }
            }
        }

        let off_grid = guests.rooms().filter(|&room| !self.grid.contains(room)).count();
        if off_grid > 0 {
            debug!(off_grid, "stays for rooms not on the grid left off the roster");
        }
        debug!(rooms = self.grid.room_count(), due, "roster laid out");
        roster
    }

    /// Borders and centering over the header and room rows
    fn draw_grid(roster: &mut Roster, last_row: u32) {
        for row in HEADER_ROW..=last_row {
            for col in 0..SHEET_COLUMNS {
                let border = if col == SPACER_COLUMN {
                    CellBorder::Vertical
                } else {
                    CellBorder::Thin
                };
                roster.set_style(row, col, CellStyle::default().centered().border(border));
            }
        }
    }

    fn write_title(roster: &mut Roster, stamp: NaiveDate) {
        roster.set_value(TITLE_ROW, 1, STAMP_LABEL);
        roster.set_style(TITLE_ROW, 1, CellStyle::default().align(HorizontalAlign::Right));
        roster.set_value(TITLE_ROW, 2, stamp.format(DATE_FORMAT).to_string());
        roster.set_style(TITLE_ROW, 2, CellStyle::default().bold());
    }

    fn write_headers(roster: &mut Roster) {
        for block in Block::ALL {
            for column in Column::ALL {
                let col = column_index(block, column);
                roster.set_value(HEADER_ROW, col, column.header());
                roster.style_mut(HEADER_ROW, col).bold = true;
            }
        }
        roster.style_mut(HEADER_ROW, SPACER_COLUMN).bold = true;
    }

    /// Fill in one occupied room; returns whether it is due
    fn write_stay(
        roster: &mut Roster,
        block: Block,
        row: u32,
        stay: &GuestStay,
        today: NaiveDateTime,
    ) -> bool {
        roster.set_value(row, column_index(block, Column::GuestName), stay.guest_name.as_str());
        roster.set_value(
            row,
            column_index(block, Column::Arrival),
            stay.arrival.format(DATE_FORMAT).to_string(),
        );
        roster.set_value(
            row,
            column_index(block, Column::Departure),
            stay.departure.format(DATE_FORMAT).to_string(),
        );

        let due = stay.is_due_today(today);
        if due {
            let col = column_index(block, Column::Housekeeping);
            roster.set_value(row, col, DUE_MARKER);
            roster.style_mut(row, col).bold = true;
        }
        due
    }
}

/// Lay out `guests` on `grid`
pub fn layout_roster(
    guests: &GuestList,
    grid: &RoomGrid,
    today: NaiveDateTime,
    stamp: NaiveDate,
) -> Roster {
    RosterLayoutEngine::new(grid.clone()).layout(guests, today, stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use thirdnight_core::CellValue;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn morning(d: NaiveDate) -> NaiveDateTime {
        d.and_hms_opt(7, 30, 0).unwrap()
    }

    fn text(roster: &Roster, row: u32, col: u16) -> Option<&str> {
        roster.get(row, col).and_then(|c| c.text())
    }

    fn small_grid() -> RoomGrid {
        RoomGrid::new([105, 106, 107], [201, 202])
    }

    #[test]
    fn sheet_settings_match_roster_shape() {
        let roster = RosterLayoutEngine::default().layout(
            &GuestList::new(),
            morning(date(2024, 1, 7)),
            date(2024, 1, 7),
        );

        assert_eq!(
            roster.column_widths,
            vec![7.0, 21.0, 10.0, 10.0, 10.0, 3.0, 7.0, 21.0, 10.0, 10.0, 10.0]
        );
        assert_eq!(roster.orientation, Orientation::Landscape);
        // Rows 2 through 33 in sheet terms
        assert_eq!(roster.row_heights.keys().copied().collect::<Vec<_>>(), (1..=32).collect::<Vec<_>>());
        assert!(roster.row_heights.values().all(|&h| h == 14.5));
        assert_eq!(roster.dimensions(), (33, 11));
    }

    #[test]
    fn title_and_headers() {
        let roster = layout_roster(
            &GuestList::new(),
            &small_grid(),
            morning(date(2024, 1, 7)),
            date(2024, 1, 6),
        );

        assert_eq!(text(&roster, 0, 1), Some(STAMP_LABEL));
        assert_eq!(roster.get(0, 1).unwrap().style.align, HorizontalAlign::Right);
        // Stamp date is independent of the evaluation instant
        assert_eq!(text(&roster, 0, 2), Some("2024-01-06"));
        assert!(roster.get(0, 2).unwrap().style.bold);

        let headers: Vec<_> = (0..SHEET_COLUMNS).map(|c| text(&roster, HEADER_ROW, c)).collect();
        assert_eq!(
            headers,
            vec![
                Some("ROOM"),
                Some("GUEST NAME"),
                Some("ARRIVE"),
                Some("DEPART"),
                Some("HSK"),
                None,
                Some("ROOM"),
                Some("GUEST NAME"),
                Some("ARRIVE"),
                Some("DEPART"),
                Some("HSK"),
            ]
        );
        assert!((0..SHEET_COLUMNS).all(|c| roster.get(HEADER_ROW, c).unwrap().style.bold));
    }

    #[test]
    fn every_grid_room_gets_a_row() {
        let roster = layout_roster(
            &GuestList::new(),
            &small_grid(),
            morning(date(2024, 1, 7)),
            date(2024, 1, 7),
        );

        assert_eq!(roster.value(3, 0), Some(&CellValue::Number(105.0)));
        assert_eq!(roster.value(5, 0), Some(&CellValue::Number(107.0)));
        assert_eq!(roster.value(3, 6), Some(&CellValue::Number(201.0)));
        assert_eq!(roster.value(4, 6), Some(&CellValue::Number(202.0)));
        assert!(roster.get(3, 0).unwrap().style.bold);
        // Short right block leaves a bordered blank row
        assert_eq!(roster.value(5, 6), None);
        assert_eq!(roster.get(5, 6).unwrap().style.border, CellBorder::Thin);
        // Vacant room has no name or marker
        assert_eq!(roster.value(3, 1), None);
        assert_eq!(roster.value(3, 4), None);
    }

    #[test]
    fn occupied_rooms_show_stay_and_due_marker() {
        let mut guests = GuestList::new();
        guests.insert(GuestStay::new(106, "Moreau, Luc", date(2024, 1, 1), date(2024, 1, 10)));
        guests.insert(GuestStay::new(202, "Haddad, Omar", date(2024, 1, 5), date(2024, 1, 9)));

        let roster = layout_roster(&guests, &small_grid(), morning(date(2024, 1, 7)), date(2024, 1, 7));

        assert_eq!(text(&roster, 4, 1), Some("Moreau, Luc"));
        assert_eq!(text(&roster, 4, 2), Some("2024-01-01"));
        assert_eq!(text(&roster, 4, 3), Some("2024-01-10"));
        assert_eq!(text(&roster, 4, 4), Some(DUE_MARKER));
        assert!(roster.get(4, 4).unwrap().style.bold);

        assert_eq!(text(&roster, 4, 7), Some("Haddad, Omar"));
        assert_eq!(text(&roster, 4, 8), Some("2024-01-05"));
        assert_eq!(text(&roster, 4, 9), Some("2024-01-09"));
        // Arrived on the 5th: next service is the 8th
        assert_eq!(text(&roster, 4, 10), None);
    }

    #[test]
    fn off_grid_rooms_are_omitted() {
        let mut guests = GuestList::new();
        guests.insert(GuestStay::new(999, "Ghost, Guest", date(2024, 1, 1), date(2024, 1, 10)));

        let roster = layout_roster(&guests, &small_grid(), morning(date(2024, 1, 7)), date(2024, 1, 7));

        let names: Vec<_> = roster.cells().filter_map(|(_, c)| c.text()).collect();
        assert!(!names.contains(&"Ghost, Guest"));
        assert!(!names.contains(&DUE_MARKER));
    }

    #[test]
    fn grid_cells_are_centered_and_bordered() {
        let roster = layout_roster(
            &GuestList::new(),
            &small_grid(),
            morning(date(2024, 1, 7)),
            date(2024, 1, 7),
        );

        for row in HEADER_ROW..=5 {
            for col in 0..SHEET_COLUMNS {
                let style = roster.get(row, col).unwrap().style;
                assert_eq!(style.align, HorizontalAlign::Center);
                assert!(style.middle);
                let expected = if col == SPACER_COLUMN {
                    CellBorder::Vertical
                } else {
                    CellBorder::Thin
                };
                assert_eq!(style.border, expected, "cell ({row}, {col})");
            }
        }
        // Nothing styled below the last room row
        assert!(roster.get(6, 0).is_none());
        assert_eq!(roster.get(1, 0), None);
    }

    #[test]
    fn empty_grid_still_has_title_and_headers() {
        let roster = layout_roster(
            &GuestList::new(),
            &RoomGrid::new([], []),
            morning(date(2024, 1, 7)),
            date(2024, 1, 7),
        );
        assert_eq!(text(&roster, HEADER_ROW, 0), Some("ROOM"));
        assert_eq!(roster.dimensions().0, HEADER_ROW + 1);
    }

    #[test]
    fn column_index_spans_both_blocks() {
        assert_eq!(column_index(Block::Left, Column::Room), 0);
        assert_eq!(column_index(Block::Left, Column::Housekeeping), 4);
        assert_eq!(column_index(Block::Right, Column::Room), 6);
        assert_eq!(column_index(Block::Right, Column::Housekeeping), 10);
        assert_eq!(room_row(29), 32);
    }
}
