//! Plain-text roster renderer
//!
//! Prints a laid-out [`Roster`] as fixed-width text for terminal previews.
//! Column widths come from the roster; values longer than their column are
//! cut off.
//!
//! ## Example Output
//!
//! ```text
//!          GUEST LIST DATE: 2024-01-07
//!
//!   ROOM        GUEST NAME          ARRIVE     DEPART      HSK         ROOM ...
//!   105         Moreau, Luc       2024-01-01 2024-01-10     X          222
//! ```

use thirdnight_core::{Cell, CellValue, HorizontalAlign, RenderError, Renderer, Roster};

/// Fixed-width text renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Text placed between adjacent columns
    pub separator: String,
    /// Width used for columns without an explicit width
    pub default_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            separator: " ".into(),
            default_width: 8,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column separator
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the width of columns the roster leaves unsized
    pub fn default_width(mut self, width: usize) -> Self {
        self.default_width = width;
        self
    }

    fn column_width(&self, roster: &Roster, col: u16) -> usize {
        roster
            .column_widths
            .get(usize::from(col))
            .map_or(self.default_width, |w| w.round().max(1.0) as usize)
    }

    fn render_cell(cell: Option<&Cell>, width: usize) -> String {
        let Some(cell) = cell else {
            return " ".repeat(width);
        };
        let Some(value) = &cell.value else {
            return " ".repeat(width);
        };

        let text: String = value.to_string().chars().take(width).collect();
        match (cell.style.align, value) {
            (HorizontalAlign::Center, _) => format!("{text:^width$}"),
            (HorizontalAlign::Right, _) | (HorizontalAlign::General, CellValue::Number(_)) => {
                format!("{text:>width$}")
            }
            _ => format!("{text:<width$}"),
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, roster: &Roster) -> Result<String, RenderError> {
        let (rows, cols) = roster.dimensions();
        if rows == 0 {
            return Err(RenderError::InvalidData("roster has no cells".into()));
        }

        let widths: Vec<usize> = (0..cols).map(|c| self.column_width(roster, c)).collect();
        let mut output = String::new();

        for row in 0..rows {
            let line: Vec<String> = (0..cols)
                .map(|col| Self::render_cell(roster.get(row, col), widths[usize::from(col)]))
                .collect();
            output.push_str(line.join(&self.separator).trim_end());
            output.push('\n');
        }

        Ok(output)
    }
}
