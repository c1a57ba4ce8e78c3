//! Write-then-read checks for the XLSX engine.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use rowsheet_core::{CellError, CellValue, Workbook};
use rowsheet_xlsx::{XlsxReader, XlsxWriter};

fn reread(workbook: &Workbook) -> Workbook {
    let bytes = XlsxWriter::to_bytes(workbook).unwrap();
    XlsxReader::read(Cursor::new(bytes)).unwrap()
}

#[test]
fn test_sheet_order_and_names_survive() {
    let mut wb = Workbook::empty();
    wb.add_worksheet_with_name("Trades").unwrap();
    wb.add_worksheet_with_name("P&L <daily>").unwrap();
    wb.add_worksheet_with_name("Ünïcode").unwrap();

    let back = reread(&wb);
    assert_eq!(back.sheet_names(), vec!["Trades", "P&L <daily>", "Ünïcode"]);
}

#[test]
fn test_cell_values_survive() {
    let mut wb = Workbook::empty();
    let idx = wb.add_worksheet_with_name("Data").unwrap();
    let ws = wb.worksheet_mut(idx).unwrap();
    ws.set_cell_value_at(0, 0, "EURUSD").unwrap();
    ws.set_cell_value_at(0, 1, 1.0842).unwrap();
    ws.set_cell_value_at(0, 2, false).unwrap();
    ws.set_cell_value_at(0, 3, CellError::Na).unwrap();
    ws.set_cell_value_at(1, 0, "  spaced  ").unwrap();
    ws.set_cell_value_at(1, 1, "line1\r\nline2").unwrap();
    ws.set_cell_value_at(1, 2, "").unwrap();
    ws.set_cell_value_at(4, 7, CellValue::formula("B1*2", Some(CellValue::Number(2.1684))))
        .unwrap();

    let back = reread(&wb);
    let ws = back.worksheet_by_name("Data").unwrap();

    assert_eq!(ws.get_value_at(0, 0), CellValue::string("EURUSD"));
    assert_eq!(ws.get_value_at(0, 1), CellValue::Number(1.0842));
    assert_eq!(ws.get_value_at(0, 2), CellValue::Boolean(false));
    assert_eq!(ws.get_value_at(0, 3), CellValue::Error(CellError::Na));
    assert_eq!(ws.get_value_at(1, 0), CellValue::string("  spaced  "));
    assert_eq!(ws.get_value_at(1, 1), CellValue::string("line1\r\nline2"));
    assert_eq!(ws.get_value_at(1, 2), CellValue::string(""));

    let formula = ws.get_value_at(4, 7);
    assert_eq!(formula.formula_text(), Some("=B1*2"));
    assert_eq!(formula.to_text(), "2.1684");

    assert_eq!(ws.highest_row(), 5);
    assert_eq!(ws.highest_column(), 8);
}

#[test]
fn test_empty_sheet_survives() {
    let mut wb = Workbook::empty();
    wb.add_worksheet_with_name("Blank").unwrap();

    let back = reread(&wb);
    let ws = back.worksheet(0).unwrap();
    assert!(ws.is_empty());
    assert_eq!(ws.highest_row(), 1);
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");

    let mut wb = Workbook::empty();
    let idx = wb.add_worksheet_with_name("Sheet1").unwrap();
    wb.worksheet_mut(idx)
        .unwrap()
        .set_cell_value("C7", "seven")
        .unwrap();

    XlsxWriter::write_file(&wb, &path).unwrap();
    let back = XlsxReader::read_file(&path).unwrap();

    assert_eq!(
        back.worksheet(0).unwrap().get_value("C7").unwrap(),
        CellValue::string("seven")
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = XlsxReader::read_file(dir.path().join("nope.xlsx")).unwrap_err();
    assert!(matches!(err, rowsheet_xlsx::XlsxError::Io(_)));
}
