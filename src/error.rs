use thiserror::Error;

/// Main error type for the shipments dashboard.
/// Aggregates errors from the standard library, the spreadsheet stack and the dashboard modules.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{0}")]
    WithContextError(String),

    /// One or more required sections are absent from the uploaded workbook.
    #[error("Missing required sections: {}. Expected: {}", .missing.join(", "), .expected.join(", "))]
    MissingSectionError {
        missing: Vec<String>,
        expected: Vec<String>,
    },

    /// One or more canonical fields could not be matched against a section header.
    #[error("Missing required columns in '{section}': {}. Check that the daily file keeps the same layout and names", .missing.join(", "))]
    MissingColumnError {
        section: String,
        missing: Vec<String>,
    },

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    StringEncodingError(#[from] std::str::Utf8Error),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    XlsxWriterError(#[from] rust_xlsxwriter::XlsxError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, DashboardError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| DashboardError::WithContextError(format!("{}: {}", message, e)))
    }
}
