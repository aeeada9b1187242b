//! Excel roster renderer
//!
//! Writes a laid-out [`Roster`] to a single-sheet XLSX workbook. Every cell
//! style is mapped to one rust_xlsxwriter [`Format`], built once per distinct
//! style.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::collections::HashMap;
use thirdnight_core::{
    CellBorder, CellStyle, CellValue, HorizontalAlign, Orientation, RenderError, Renderer, Roster,
};
use tracing::debug;

/// XLSX roster renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Worksheet name
    pub sheet_name: String,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet".into(),
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, roster: &Roster) -> Result<Vec<u8>, RenderError> {
        if roster.cells().next().is_none() {
            return Err(RenderError::InvalidData("roster has no cells".into()));
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name).map_err(format_error)?;

        apply_sheet_settings(sheet, roster)?;
        let written = write_cells(sheet, roster)?;
        debug!(cells = written, sheet = %self.sheet_name, "roster written");

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        Ok(buffer)
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, roster: &Roster) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(roster)
    }
}

/// Page orientation, column widths and row heights
fn apply_sheet_settings(sheet: &mut Worksheet, roster: &Roster) -> Result<(), RenderError> {
    if roster.orientation == Orientation::Landscape {
        sheet.set_landscape();
    }

    for (col, &width) in roster.column_widths.iter().enumerate() {
        let col = u16::try_from(col)
            .map_err(|_| RenderError::InvalidData(format!("column {col} out of range")))?;
        sheet.set_column_width(col, width).map_err(format_error)?;
    }

    for (&row, &height) in &roster.row_heights {
        sheet.set_row_height(row, height).map_err(format_error)?;
    }

    Ok(())
}

/// Write every cell, returning how many were written
fn write_cells(sheet: &mut Worksheet, roster: &Roster) -> Result<usize, RenderError> {
    let mut formats: HashMap<CellStyle, Format> = HashMap::new();
    let mut written = 0;

    for ((row, col), cell) in roster.cells() {
        let format = formats
            .entry(cell.style)
            .or_insert_with(|| cell_format(&cell.style));

        match &cell.value {
            Some(CellValue::Text(text)) => {
                sheet.write_string_with_format(row, col, text, format)
            }
            Some(CellValue::Number(number)) => {
                sheet.write_number_with_format(row, col, *number, format)
            }
            None => sheet.write_blank(row, col, format),
        }
        .map_err(format_error)?;
        written += 1;
    }

    Ok(written)
}

/// rust_xlsxwriter format for a roster cell style
pub fn cell_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }

    format = match style.align {
        HorizontalAlign::General => format,
        HorizontalAlign::Left => format.set_align(FormatAlign::Left),
        HorizontalAlign::Center => format.set_align(FormatAlign::Center),
        HorizontalAlign::Right => format.set_align(FormatAlign::Right),
    };
    if style.middle {
        format = format.set_align(FormatAlign::VerticalCenter);
    }

    match style.border {
        CellBorder::None => format,
        CellBorder::Thin => format.set_border(FormatBorder::Thin),
        CellBorder::Vertical => format
            .set_border_left(FormatBorder::Thin)
            .set_border_right(FormatBorder::Thin),
    }
}

fn format_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}
