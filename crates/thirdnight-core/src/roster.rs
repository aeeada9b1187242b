//! Rendered roster contract
//!
//! A [`Roster`] is a sparse grid of styled cells plus sheet-level settings
//! (column widths, row heights, orientation). It is produced by the layout
//! engine and consumed by [`crate::Renderer`] implementations; it carries no
//! spreadsheet-library types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cell content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n as f64)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

/// Cell border
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellBorder {
    #[default]
    None,
    /// Thin line on all four sides
    Thin,
    /// Thin left and right lines only
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub align: HorizontalAlign,
    /// Vertically centered
    pub middle: bool,
    pub border: CellBorder,
}

impl CellStyle {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = HorizontalAlign::Center;
        self.middle = true;
        self
    }

    pub fn border(mut self, border: CellBorder) -> Self {
        self.border = border;
        self
    }
}

/// A styled cell, possibly without content
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Option<CellValue>,
    pub style: CellStyle,
}

impl Cell {
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(CellValue::as_text)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Laid-out roster sheet. Rows and columns are zero-based.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    cells: BTreeMap<(u32, u16), Cell>,
    /// Column widths in character units, indexed by column
    pub column_widths: Vec<f64>,
    /// Explicit row heights in points
    pub row_heights: BTreeMap<u32, f64>,
    pub orientation: Orientation,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell's value, keeping any style already applied
    pub fn set_value(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        self.cells.entry((row, col)).or_default().value = Some(value.into());
    }

    /// Replace a cell's style, keeping its value
    pub fn set_style(&mut self, row: u32, col: u16, style: CellStyle) {
        self.cells.entry((row, col)).or_default().style = style;
    }

    /// Mutable access to a cell's style, creating the cell if needed
    pub fn style_mut(&mut self, row: u32, col: u16) -> &mut CellStyle {
        &mut self.cells.entry((row, col)).or_default().style
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.get(row, col).and_then(|c| c.value.as_ref())
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> + '_ {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    /// (rows, columns) spanned by cells and column widths
    pub fn dimensions(&self) -> (u32, u16) {
        let rows = self.cells.keys().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let cols = self.cells.keys().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (rows, cols.max(self.column_widths.len() as u16))
    }
}
