//! # Spreadsheet Processing Module
//!
//! Reads uploaded Excel 2007+ workbooks (`.xlsx`) into plain tables and writes
//! tables back out as `.xlsx` byte streams. Reading is done directly over the
//! ZIP package and its SpreadsheetML parts; writing goes through `rust_xlsxwriter`.
use crate::error::DashboardError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use thiserror::Error;

pub mod cell;
pub(crate) mod reference;
pub(crate) mod sheet;
pub mod writer;
pub(crate) mod xlsx;

/// Errors raised while reading or writing spreadsheet packages.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The upload is not a ZIP based Office Open XML package
    #[error("Cannot read '{0}' as an xlsx workbook (password protected or not an xlsx file)")]
    InvalidFileFormat(String),

    /// A required part is missing from the package
    #[error("Missing part '{0}' in workbook")]
    FileError(String),

    /// The workbook declares no worksheets
    #[error("Workbook '{0}' has no worksheets")]
    SpreadsheetEmptyError(String),

    /// A cell references a style or shared string that does not exist
    #[error("Invalid cell value at '{0}'!'{1}': {2}")]
    CellValueError(String, String, String),
}

/// One row of a table; `None` marks a missing cell.
pub type Row = Vec<Option<Cell>>;

/// A rectangular table: a header row plus data rows of the same width.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Sheet name the table came from
    pub name: String,
    /// Header texts, one per column
    pub headers: Vec<String>,
    /// Data rows, each padded or truncated to the header width
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Table { name: name.to_owned(), headers, rows }
    }

    /// Returns the cell at `(row, col)` if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }
}

/// A workbook: the ordered list of its sheets as tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbook {
    pub tables: Vec<Table>,
}

impl Workbook {
    pub fn new(tables: Vec<Table>) -> Self {
        Workbook { tables }
    }

    /// Parses an uploaded `.xlsx` held in memory.
    pub fn from_xlsx(name: &str, bytes: Vec<u8>) -> Result<Self, DashboardError> {
        let mut spreadsheet = XlsxSpreadsheet::open(name, bytes)?;
        let tables = spreadsheet
            .read_sheets()?
            .into_iter()
            .map(|sheet| sheet.into_table())
            .collect();
        Ok(Workbook { tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_match_header_width() {
        let table = Table::new(
            "entregas",
            vec!["DTM".to_owned(), "CTE".to_owned()],
            vec![vec![Some(Cell::text("D-1"))], vec![Some(Cell::text("D-2")), Some(Cell::text("9")), Some(Cell::text("x"))]],
        );
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.cell(1, 1).map(|cell| cell.value.as_str()), Some("9"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_garbage_upload_is_rejected() {
        let error = Workbook::from_xlsx("notes.txt", b"not a zip".to_vec()).unwrap_err();
        assert!(error.to_string().contains("notes.txt"));
    }
}
