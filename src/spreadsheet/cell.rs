use crate::spreadsheet::reference::index_to_reference;
use chrono::TimeDelta;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use std::fmt::Display;

/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Text, inline or resolved from the shared string table
    Text,
    /// Error values (`#N/A`, `#REF!`, ...)
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Analyzes format codes for date/time patterns outside literals and colors.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' if !is_escaped => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_literal && !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_color && !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }

    /// Whether the value is an Excel serial day number that carries a calendar date.
    fn is_serial_date(&self) -> bool {
        matches!(
            self,
            Self::NumberDateTime1900 | Self::NumberDate1900 | Self::NumberDateTime1904 | Self::NumberDate1904
        )
    }

    fn is_1904(&self) -> bool {
        matches!(
            self,
            Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904
        )
    }
}

/// A single cell with its position, type and raw value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell data type
    pub kind: CellType,
    /// Cell value as stored in the file
    pub value: String,
}

impl Cell {
    /// Creates a text cell without a position, for tables built in memory.
    pub fn text(value: impl Into<String>) -> Self {
        Cell { row: 0, col: 0, kind: CellType::Text, value: value.into() }
    }

    /// Creates a plain numeric cell without a position.
    pub fn number(value: f64) -> Self {
        Cell { row: 0, col: 0, kind: CellType::Number, value: value.to_string() }
    }

    /// Creates an ISO date cell without a position.
    pub fn date(value: NaiveDate) -> Self {
        Cell { row: 0, col: 0, kind: CellType::IsoDateTime, value: value.format("%Y-%m-%d").to_string() }
    }

    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Display text of the cell, `None` for empty and error cells.
    pub fn to_text(&self) -> Option<String> {
        match self.kind {
            CellType::Empty | CellType::Error => None,
            _ => Some(self.to_string()),
        }
    }

    /// Interprets the cell as a calendar date.
    ///
    /// Date-styled numbers convert from their serial day, ISO and text values are tried
    /// against `formats` in order. Anything else, including unparseable text, is `None`.
    pub fn to_date(&self, formats: &[String]) -> Option<NaiveDate> {
        match self.kind {
            kind if kind.is_serial_date() => {
                let days = self.value.parse::<f64>().ok()?.trunc() as i64;
                serial_to_date(days, kind.is_1904())
            }
            CellType::IsoDateTime | CellType::Text => parse_date(self.value.trim(), formats),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self.kind {
            CellType::Boolean => if self.value == "1" { "true" } else { "false" }.to_owned(),
            kind if kind.is_serial_date() => self
                .value
                .parse::<f64>()
                .ok()
                .and_then(|days| serial_to_date(days.trunc() as i64, kind.is_1904()))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| self.value.to_owned()),
            CellType::IsoDateTime => self.value.replace('T', " "),
            _ => self.value.to_owned(),
        };
        write!(f, "{}", value)
    }
}

/// Converts an Excel serial day number to a date, `None` outside chrono's range.
/// Honours the Lotus 1-2-3 leap year bug of the 1900 system.
fn serial_to_date(days: i64, is_1904: bool) -> Option<NaiveDate> {
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let delta = TimeDelta::try_days(days.checked_add(offset)?)?;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(delta)
}

/// Tries each format as a date, then as a date-time truncated to its date.
fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(value, format).ok().map(|datetime| datetime.date()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> Vec<String> {
        crate::config::DEFAULT_DATE_FORMATS.iter().map(|it| it.to_string()).collect()
    }

    fn cell(kind: CellType, value: &str) -> Cell {
        Cell { row: 4, col: 1, kind, value: value.to_owned() }
    }

    #[test]
    fn test_custom_number_format() {
        assert_eq!(CellType::parse_custom_number_format("yyyy-mm-dd", false), CellType::NumberDate1900);
        assert_eq!(CellType::parse_custom_number_format("dd/mm/yyyy hh:mm", true), CellType::NumberDateTime1904);
        assert_eq!(CellType::parse_custom_number_format("hh:mm:ss", false), CellType::NumberTime1900);
        assert_eq!(CellType::parse_custom_number_format("\"Day\" 0.00", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("[Red]0.00", false), CellType::Number);
    }

    #[test]
    fn test_serial_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(cell(CellType::NumberDate1900, "45356").to_date(&formats()), Some(date));
        assert_eq!(cell(CellType::NumberDateTime1900, "45356.75").to_date(&formats()), Some(date));
        assert_eq!(cell(CellType::NumberDate1904, "43894").to_date(&formats()), Some(date));
        assert_eq!(cell(CellType::NumberDate1900, "45356").to_string(), "2024-03-05");
        assert_eq!(
            cell(CellType::NumberDate1900, "1").to_date(&formats()),
            NaiveDate::from_ymd_opt(1900, 1, 1)
        );
    }

    #[test]
    fn test_out_of_range_serial_is_not_a_date() {
        assert_eq!(cell(CellType::NumberDate1900, "99999999999").to_date(&formats()), None);
        assert_eq!(cell(CellType::NumberDateTime1904, "1e300").to_date(&formats()), None);
        assert_eq!(cell(CellType::NumberDate1900, "-1e11").to_date(&formats()), None);
        assert_eq!(cell(CellType::NumberDate1900, "99999999999").to_string(), "99999999999");
    }

    #[test]
    fn test_text_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(cell(CellType::Text, "2024-03-05").to_date(&formats()), date);
        assert_eq!(cell(CellType::Text, " 05/03/2024 ").to_date(&formats()), date);
        assert_eq!(cell(CellType::Text, "05/03/2024 14:30:00").to_date(&formats()), date);
        assert_eq!(cell(CellType::IsoDateTime, "2024-03-05T08:15:00").to_date(&formats()), date);
    }

    #[test]
    fn test_non_dates_are_none() {
        assert_eq!(cell(CellType::Text, "pending").to_date(&formats()), None);
        assert_eq!(cell(CellType::Text, "31/02/2024").to_date(&formats()), None);
        assert_eq!(cell(CellType::Text, "   ").to_date(&formats()), None);
        assert_eq!(cell(CellType::Number, "45356").to_date(&formats()), None);
        assert_eq!(cell(CellType::Boolean, "1").to_date(&formats()), None);
        assert_eq!(cell(CellType::NumberTime1900, "0.5").to_date(&formats()), None);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(cell(CellType::Boolean, "1").to_text().as_deref(), Some("true"));
        assert_eq!(cell(CellType::Number, "12345").to_text().as_deref(), Some("12345"));
        assert_eq!(cell(CellType::Error, "#N/A").to_text(), None);
        assert_eq!(cell(CellType::Empty, "").to_text(), None);
        assert_eq!(cell(CellType::Text, "x").reference(), "B5");
        assert_eq!(Cell::number(12.0).value, "12");
        assert_eq!(Cell::date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(), "2024-01-02");
    }
}
