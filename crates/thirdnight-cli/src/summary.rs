//! Terminal output of the due-today summary
//!
//! ```text
//! Loaded 3 guest records
//! Rooms needing housekeeping: 2
//!
//!   #  ROOM  GUEST NAME              ARRIVE      DEPART
//!   1  105   Moreau, Luc             01/01/2024  01/10/2024
//!   2  310   Lindqvist, Eva          01/04/2024  01/12/2024
//! ```

use std::io::{self, Write};

use thirdnight_report::DueSummary;

/// Date format of the due table
const TABLE_DATE_FORMAT: &str = "%m/%d/%Y";

pub const NOTHING_DUE: &str = "No rooms need housekeeping today";

pub fn write_record_count(out: &mut impl Write, summary: &DueSummary) -> io::Result<()> {
    writeln!(out, "Loaded {} guest records", summary.record_count)
}

/// Due count and table, or the all-clear message
pub fn write_due_table(out: &mut impl Write, summary: &DueSummary) -> io::Result<()> {
    if summary.nothing_due() {
        return writeln!(out, "{NOTHING_DUE}");
    }

    writeln!(out, "Rooms needing housekeeping: {}", summary.due_count())?;
    writeln!(out)?;

    let name_width = summary
        .due
        .iter()
        .map(|d| d.guest_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("GUEST NAME".len());

    writeln!(
        out,
        "{:>3}  {:<4}  {:<name_width$}  {:<10}  {:<10}",
        "#", "ROOM", "GUEST NAME", "ARRIVE", "DEPART"
    )?;
    for due in &summary.due {
        writeln!(
            out,
            "{:>3}  {:<4}  {:<name_width$}  {}  {}",
            due.position,
            due.room,
            due.guest_name,
            due.arrival.format(TABLE_DATE_FORMAT),
            due.departure.format(TABLE_DATE_FORMAT),
        )?;
    }
    Ok(())
}
