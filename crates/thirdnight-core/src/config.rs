//! Report configuration
//!
//! All configuration is injected: the room grid and the export layout default
//! to the values of the property the tool was built for, and a TOML file may
//! override any subset of them.
//!
//! ```toml
//! [grid]
//! left = [101, 102, 103]
//! right = [201, 202]
//!
//! [export]
//! skip_rows = 12
//! ```

use crate::{ConfigError, RoomNumber, SENTINEL_ROOM};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Left block rooms, top to bottom
const DEFAULT_LEFT_BLOCK: [RoomNumber; 30] = [
    105, 106, 107, 108, 109, 110, 111, 112, 114, 115, //
    201, 202, 203, 204, 205, 206, 207, 208, 209, 210, //
    211, 212, 214, 215, 216, 217, 218, 219, 220, 221,
];

/// Right block rooms, top to bottom
const DEFAULT_RIGHT_BLOCK: [RoomNumber; 30] = [
    222, 223, 224, 225, 226, //
    301, 302, 303, 304, 305, 306, 307, 308, 309, 310, //
    311, 312, 314, 315, 316, 317, 318, 319, 320, //
    321, 322, 323, 324, 325, 326,
];

// ============================================================================
// Room Grid
// ============================================================================

/// One side of the two-block roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Left,
    Right,
}

impl Block {
    pub const ALL: [Block; 2] = [Block::Left, Block::Right];
}

/// Position of a room on the roster
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSlot {
    pub block: Block,
    /// Zero-based position within the block's room list
    pub position: usize,
}

/// Fixed room-number layout of the roster.
///
/// A room appears in at most one block; rooms in neither block are left off
/// the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomGrid {
    pub left: Vec<RoomNumber>,
    pub right: Vec<RoomNumber>,
}

impl Default for RoomGrid {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT_BLOCK.to_vec(),
            right: DEFAULT_RIGHT_BLOCK.to_vec(),
        }
    }
}

impl RoomGrid {
    pub fn new(left: impl Into<Vec<RoomNumber>>, right: impl Into<Vec<RoomNumber>>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Check that no room is listed twice and the placeholder room is absent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for &room in self.left.iter().chain(&self.right) {
            if room == SENTINEL_ROOM {
                return Err(ConfigError::SentinelRoom);
            }
            if !seen.insert(room) {
                return Err(ConfigError::DuplicateRoom(room));
            }
        }
        Ok(())
    }

    /// Rooms of one block in display order
    pub fn block(&self, block: Block) -> &[RoomNumber] {
        match block {
            Block::Left => &self.left,
            Block::Right => &self.right,
        }
    }

    /// Find where a room is rendered, if anywhere
    pub fn locate(&self, room: RoomNumber) -> Option<GridSlot> {
        Block::ALL.into_iter().find_map(|block| {
            self.block(block)
                .iter()
                .position(|&r| r == room)
                .map(|position| GridSlot { block, position })
        })
    }

    pub fn contains(&self, room: RoomNumber) -> bool {
        self.locate(room).is_some()
    }

    /// Number of data rows needed to show both blocks
    pub fn row_count(&self) -> usize {
        self.left.len().max(self.right.len())
    }

    /// Total number of rooms across both blocks
    pub fn room_count(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

// ============================================================================
// Export Layout
// ============================================================================

/// Shape of the PMS "In House Guests" export.
///
/// Column indices are zero-based source columns of the first worksheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    /// Leading title/metadata rows to skip
    pub skip_rows: u32,
    /// Room code column (e.g. `105-KNG`)
    pub room_column: u16,
    pub guest_name_column: u16,
    pub arrival_column: u16,
    pub departure_column: u16,
    /// Column searched for the end-of-data marker
    pub end_marker_column: u16,
    /// Text marking the end of guest rows
    pub end_marker: String,
    /// chrono format of arrival/departure text
    pub date_format: String,
    /// Separator between room number and room type in the room code
    pub room_separator: char,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            skip_rows: 15,
            room_column: 3,
            guest_name_column: 6,
            arrival_column: 7,
            departure_column: 9,
            end_marker_column: 3,
            end_marker: "Total Rooms".into(),
            date_format: "%m/%d/%y".into(),
            room_separator: '-',
        }
    }
}

impl ExportLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_marker.trim().is_empty() {
            return Err(ConfigError::InvalidLayout("end marker must not be empty".into()));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidLayout("date format must not be empty".into()));
        }
        let columns = [
            ("room", self.room_column),
            ("guest name", self.guest_name_column),
            ("arrival", self.arrival_column),
            ("departure", self.departure_column),
        ];
        for (i, (name, col)) in columns.iter().enumerate() {
            if let Some((other, _)) = columns[i + 1..].iter().find(|(_, c)| c == col) {
                return Err(ConfigError::InvalidLayout(format!(
                    "{} and {} columns both use index {}",
                    name, other, col
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Report Config
// ============================================================================

/// Everything a report run needs besides the input and the date
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub grid: RoomGrid,
    pub export: ExportLayout,
}

impl ReportConfig {
    pub fn new(grid: RoomGrid, export: ExportLayout) -> Self {
        Self { grid, export }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.export.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_grid_is_two_blocks_of_thirty() {
        let grid = RoomGrid::default();
        assert_eq!(grid.left.len(), 30);
        assert_eq!(grid.right.len(), 30);
        assert_eq!(grid.row_count(), 30);
        assert_eq!(grid.room_count(), 60);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn default_grid_skips_thirteen() {
        let grid = RoomGrid::default();
        for room in [113, 213, 313] {
            assert!(!grid.contains(room), "room {} should not be on the grid", room);
        }
    }

    #[test]
    fn locate_finds_block_and_position() {
        let grid = RoomGrid::default();
        assert_eq!(
            grid.locate(105),
            Some(GridSlot { block: Block::Left, position: 0 })
        );
        assert_eq!(
            grid.locate(221),
            Some(GridSlot { block: Block::Left, position: 29 })
        );
        assert_eq!(
            grid.locate(301),
            Some(GridSlot { block: Block::Right, position: 5 })
        );
        assert_eq!(grid.locate(999), None);
    }

    #[test]
    fn validate_rejects_room_in_both_blocks() {
        let grid = RoomGrid::new(vec![101, 102], vec![201, 102]);
        assert!(matches!(grid.validate(), Err(ConfigError::DuplicateRoom(102))));
    }

    #[test]
    fn validate_rejects_placeholder_room() {
        let grid = RoomGrid::new(vec![0], vec![]);
        assert!(matches!(grid.validate(), Err(ConfigError::SentinelRoom)));
    }

    #[test]
    fn uneven_blocks_use_longest_for_rows() {
        let grid = RoomGrid::new(vec![1, 2, 3], vec![4]);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn default_export_layout_matches_pms_export() {
        let layout = ExportLayout::default();
        assert_eq!(layout.skip_rows, 15);
        assert_eq!(
            (layout.room_column, layout.guest_name_column, layout.arrival_column, layout.departure_column),
            (3, 6, 7, 9)
        );
        assert_eq!(layout.end_marker, "Total Rooms");
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn export_layout_rejects_shared_columns() {
        let layout = ExportLayout {
            arrival_column: 9,
            ..ExportLayout::default()
        };
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("arrival and departure"));
    }

    #[test]
    fn report_config_validates_grid() {
        let config = ReportConfig::new(RoomGrid::new(vec![7, 7], vec![]), ExportLayout::default());
        assert!(config.validate().is_err());
        assert!(ReportConfig::default().validate().is_ok());
    }
}
