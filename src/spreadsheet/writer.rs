//! Serializes display tables into `.xlsx` byte streams.

use crate::error::DashboardError;
use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook;

/// MIME type of an Office Open XML spreadsheet
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Writes one worksheet holding `headers` followed by `rows`, every value as a string.
///
/// Values are written verbatim so the file shows exactly what was displayed. Empty
/// strings are left as blank cells.
pub fn write_table(sheet_name: &str, headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, DashboardError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet().set_name(sheet_name)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_number = index as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row_number, col as u16, value)?;
            }
        }
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Workbook as Upload;

    #[test]
    fn test_written_table_reads_back() {
        let rows = vec![
            vec!["Macaé".to_owned(), "".to_owned()],
            vec!["Vitória".to_owned(), "2024-03-05".to_owned()],
        ];
        let bytes = write_table("pickups", &["ORIGIN CITY", "PICKUP DATE"], &rows).unwrap();
        let workbook = Upload::from_xlsx("pickups.xlsx", bytes).unwrap();
        let table = &workbook.tables[0];
        assert_eq!(table.name, "pickups");
        assert_eq!(table.headers, vec!["ORIGIN CITY", "PICKUP DATE"]);
        assert_eq!(table.cell(0, 0).map(|cell| cell.value.as_str()), Some("Macaé"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(1, 1).map(|cell| cell.value.as_str()), Some("2024-03-05"));
    }

    #[test]
    fn test_header_only_table() {
        let bytes = write_table("deliveries", &["DTM"], &[]).unwrap();
        let workbook = Upload::from_xlsx("deliveries.xlsx", bytes).unwrap();
        assert_eq!(workbook.tables[0].headers, vec!["DTM"]);
        assert!(workbook.tables[0].rows.is_empty());
    }
}
