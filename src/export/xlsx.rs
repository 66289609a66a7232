//! XLSX export
//!
//! Produces a binary workbook with a single "Custos" sheet: a styled header
//! row and one row per record, in the order given. The document creation
//! timestamp is a parameter (never read from the system clock here), so the
//! same input always produces byte-identical output.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, Workbook, XlsxError,
};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{record::format_quantity, CostRecord, DATE_FORMAT, FIELD_HEADERS};

/// Sheet name, matching the original dashboard's worksheet tab
const SHEET_NAME: &str = "Custos";

/// Export records to an XLSX workbook in memory
pub fn to_xlsx<'a, I>(records: I, generated_at: NaiveDateTime) -> LedgerResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    build_workbook(records, generated_at).map_err(|e| LedgerError::Export(e.to_string()))
}

fn build_workbook<'a, I>(records: I, generated_at: NaiveDateTime) -> Result<Vec<u8>, XlsxError>
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_creation_datetime(&excel_datetime(generated_at)?);
    workbook.set_properties(&properties);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x336699))
        .set_align(FormatAlign::Center);
    let money_format = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in FIELD_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths roughly matching the original sheet layout.
    let widths: [(u16, f64); 12] = [
        (0, 36.0),  // id
        (1, 12.0),  // date
        (2, 24.0),  // client
        (3, 18.0),  // category
        (4, 30.0),  // description
        (5, 10.0),  // quantity
        (6, 12.0),  // unit_price
        (7, 12.0),  // discount_pct
        (8, 12.0),  // amount
        (9, 12.0),  // status
        (10, 14.0), // method
        (11, 24.0), // notes
    ];
    for (col, width) in widths {
        worksheet.set_column_width(col, width)?;
    }

    for (i, record) in records.into_iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, record.id.to_string())?;
        worksheet.write_string(row, 1, record.date.format(DATE_FORMAT).to_string())?;
        worksheet.write_string(row, 2, &record.client)?;
        worksheet.write_string(row, 3, &record.category)?;
        worksheet.write_string(row, 4, &record.description)?;
        worksheet.write_string(row, 5, format_quantity(record.quantity))?;
        worksheet.write_number_with_format(row, 6, record.unit_price.to_f64(), &money_format)?;
        worksheet.write_number(row, 7, f64::from(record.discount_pct))?;
        worksheet.write_number_with_format(row, 8, record.amount.to_f64(), &money_format)?;
        worksheet.write_string(row, 9, record.status.to_string().to_ascii_lowercase())?;
        worksheet.write_string(row, 10, record.method.to_string())?;
        worksheet.write_string(row, 11, &record.notes)?;
    }

    workbook.save_to_buffer()
}

fn excel_datetime(dt: NaiveDateTime) -> Result<ExcelDateTime, XlsxError> {
    ExcelDateTime::from_ymd(dt.year() as u16, dt.month() as u8, dt.day() as u8)?.and_hms(
        dt.hour() as u16,
        dt.minute() as u8,
        dt.second() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordDraft};
    use chrono::NaiveDate;

    fn sample_records() -> Vec<CostRecord> {
        vec![
            CostRecord::from_draft(RecordDraft::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "ClienteA",
                "Materiais",
                "Cimento",
                Money::from_cents(10000),
            )),
            CostRecord::from_draft(RecordDraft::new(
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                "ClienteB",
                "Mão de obra",
                "Diária",
                Money::from_cents(25050),
            )),
        ]
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_produces_xlsx_container() {
        let records = sample_records();
        let bytes = to_xlsx(&records, generated_at()).unwrap();
        // XLSX is a ZIP container; check the magic bytes
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_deterministic_with_fixed_timestamp() {
        let records = sample_records();
        let a = to_xlsx(&records, generated_at()).unwrap();
        let b = to_xlsx(&records, generated_at()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_view_still_has_header_sheet() {
        let bytes = to_xlsx(std::iter::empty::<&CostRecord>(), generated_at()).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
