//! Export of the current view as a downloadable workbook.
use crate::dashboard::records::SectionRecord;
use crate::dashboard::view::View;
use crate::error::DashboardError;
use crate::error::ResultMessage;
use crate::spreadsheet::writer::write_table;
use crate::spreadsheet::writer::XLSX_MIME_TYPE;
use chrono::NaiveDateTime;
use log::info;
use std::path::Path;
use std::path::PathBuf;

/// A generated workbook ready for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Export {
    /// Writes the workbook into `dir` under its own file name.
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, DashboardError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .map_err(DashboardError::from)
            .with_prefix(&format!("Write export '{}'", path.display()))?;
        Ok(path)
    }
}

/// `<section>_export_<YYYYMMDD_HHMMSS>.xlsx`
pub fn export_file_name(section: &str, timestamp: NaiveDateTime) -> String {
    format!("{}_export_{}.xlsx", section, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Serializes exactly the rows and columns of `view`, annotations included,
/// into a single-sheet workbook named after the section.
pub fn export_view<R: SectionRecord>(view: &View<'_, R>, timestamp: NaiveDateTime) -> Result<Export, DashboardError> {
    let section = R::SECTION.as_str();
    let bytes = write_table(section, &view.columns(), &view.display_rows())
        .with_prefix(&format!("Export {}", section))?;
    let file_name = export_file_name(section, timestamp);
    info!("Exported {} {} rows to '{}'", view.len(), section, file_name);
    Ok(Export { file_name, mime_type: XLSX_MIME_TYPE, bytes })
}
