//! Extraction from real workbook bytes
//!
//! Fixtures are written with rust_xlsxwriter in the shape of the PMS
//! "In House Guests" export: a 15-row title block, guest rows with the room
//! code in column D, name in G, arrival in H and departure in J, and a
//! "Total Rooms" summary row closing the data.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use thirdnight_core::{ExtractError, GuestStay, RowError};
use thirdnight_parser::{extract_guests, GuestRecordExtractor};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn write_title_block(sheet: &mut Worksheet) -> Result<(), XlsxError> {
    sheet.write_string(0, 0, "Best Western at Firestone")?;
    sheet.write_string(1, 0, "In House Guests")?;
    sheet.write_string(3, 0, "Printed: 01/07/24 06:12")?;
    for (col, header) in [(3, "Room"), (6, "Name"), (7, "Arrival"), (9, "Departure")] {
        sheet.write_string(14, col, header)?;
    }
    Ok(())
}

/// Export with text dates, rows given as (room code, name, arrival, departure)
fn pms_export(rows: &[(&str, &str, &str, &str)], footer: bool) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    write_title_block(sheet).unwrap();

    let mut row = 15;
    for (room, name, arrival, departure) in rows {
        if !room.is_empty() {
            sheet.write_string(row, 3, *room).unwrap();
        }
        sheet.write_string(row, 6, *name).unwrap();
        sheet.write_string(row, 7, *arrival).unwrap();
        sheet.write_string(row, 9, *departure).unwrap();
        row += 1;
    }
    if footer {
        sheet.write_string(row, 3, "Total Rooms: 3").unwrap();
        // Anything after the footer is report furniture
        sheet.write_string(row + 2, 3, "999-KNG").unwrap();
        sheet.write_string(row + 2, 7, "01/01/24").unwrap();
        sheet.write_string(row + 2, 9, "01/09/24").unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

#[test]
fn extracts_guests_from_xlsx_export() {
    let bytes = pms_export(
        &[
            ("214-KNG", "Haddad, Omar", "01/01/24", "01/10/24"),
            ("105-QQ", "Nguyen, Linh", "01/05/24", "01/08/24"),
            ("320-DBL", "Kowalski, Jan", "12/30/23", "01/12/24"),
        ],
        true,
    );

    let extraction = extract_guests(&bytes).unwrap();

    assert_eq!(extraction.room_count(), 3);
    assert_eq!(extraction.guests.rooms().collect::<Vec<_>>(), vec![105, 214, 320]);
    assert_eq!(
        extraction.guests.get(214),
        Some(&GuestStay::new(214, "Haddad, Omar", date(2024, 1, 1), date(2024, 1, 10)))
    );
    assert_eq!(
        extraction.guests.get(320).map(|s| s.arrival),
        Some(date(2023, 12, 30))
    );
    assert_eq!(extraction.end_marker_row, Some(18));
}

#[test]
fn rows_after_total_rooms_are_ignored() {
    let bytes = pms_export(&[("105-QQ", "Nguyen, Linh", "01/05/24", "01/08/24")], true);
    let extraction = extract_guests(&bytes).unwrap();

    assert!(!extraction.guests.contains(999));
    assert_eq!(extraction.room_count(), 1);
}

#[test]
fn export_without_footer_reads_to_last_row() {
    let bytes = pms_export(
        &[
            ("105-QQ", "Nguyen, Linh", "01/05/24", "01/08/24"),
            ("106-QQ", "Brown, Sam", "01/05/24", "01/08/24"),
        ],
        false,
    );
    let extraction = extract_guests(&bytes).unwrap();

    assert_eq!(extraction.room_count(), 2);
    assert_eq!(extraction.end_marker_row, None);
}

#[test]
fn invalid_rows_are_dropped_not_fatal() {
    let bytes = pms_export(
        &[
            ("", "Day use, no room", "01/05/24", "01/05/24"),
            ("STAFF-1", "Night auditor", "01/05/24", "01/06/24"),
            ("107-QQ", "Bad date", "1/5/2024x", "01/08/24"),
            ("108-QQ", "Valid", "01/05/24", "01/08/24"),
        ],
        true,
    );
    let extraction = extract_guests(&bytes).unwrap();

    assert_eq!(extraction.guests.rooms().collect::<Vec<_>>(), vec![108]);
    assert_eq!(extraction.dropped.len(), 3);
    assert_eq!(extraction.dropped[0].error, RowError::SentinelRoom);
    assert_eq!(
        extraction.dropped[1].error,
        RowError::InvalidRoom("STAFF-1".to_string())
    );
}

#[test]
fn duplicate_rooms_keep_later_row() {
    let bytes = pms_export(
        &[
            ("204-KNG", "Checked out early", "01/01/24", "01/03/24"),
            ("204-KNG", "Same-day arrival", "01/03/24", "01/09/24"),
        ],
        true,
    );
    let extraction = extract_guests(&bytes).unwrap();

    assert_eq!(extraction.room_count(), 1);
    assert_eq!(extraction.guests.get(204).unwrap().guest_name, "Same-day arrival");
    assert_eq!(extraction.records.len(), 2);
}

#[test]
fn native_date_cells_are_accepted() -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_title_block(sheet)?;

    let date_format = Format::new().set_num_format("mm/dd/yy");
    sheet.write_number(15, 3, 112)?;
    sheet.write_string(15, 6, "Ito, Hana")?;
    sheet.write_datetime_with_format(15, 7, &ExcelDateTime::from_ymd(2024, 2, 27)?, &date_format)?;
    sheet.write_datetime_with_format(15, 9, &ExcelDateTime::from_ymd(2024, 3, 4)?, &date_format)?;

    let bytes = workbook.save_to_buffer()?;
    let extraction = extract_guests(&bytes).unwrap();

    assert_eq!(
        extraction.guests.get(112),
        Some(&GuestStay::new(112, "Ito, Hana", date(2024, 2, 27), date(2024, 3, 4)))
    );
    Ok(())
}

#[test]
fn guests_are_read_from_first_worksheet() {
    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    write_title_block(first).unwrap();
    first.write_string(15, 3, "105-QQ").unwrap();
    first.write_string(15, 7, "01/05/24").unwrap();
    first.write_string(15, 9, "01/08/24").unwrap();

    let second = workbook.add_worksheet();
    second.write_string(15, 3, "201-KNG").unwrap();
    second.write_string(15, 7, "01/05/24").unwrap();
    second.write_string(15, 9, "01/08/24").unwrap();

    let bytes = workbook.save_to_buffer().unwrap();
    let extraction = GuestRecordExtractor::default().extract(&bytes).unwrap();

    assert_eq!(extraction.guests.rooms().collect::<Vec<_>>(), vec![105]);
    // Missing name cell becomes an empty name
    assert_eq!(extraction.guests.get(105).unwrap().guest_name, "");
}

#[test]
fn title_only_export_has_no_guests() {
    let bytes = pms_export(&[], true);
    let extraction = extract_guests(&bytes).unwrap();
    assert!(extraction.is_empty());
}

#[test]
fn non_spreadsheet_input_is_a_format_error() {
    let err = extract_guests(b"Room,Name\n105,Nguyen\n").unwrap_err();
    assert!(matches!(err, ExtractError::InputFormat(_)));

    let err = extract_guests(&[]).unwrap_err();
    assert!(matches!(err, ExtractError::InputFormat(_)));
}
