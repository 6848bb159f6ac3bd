//! Low-level plumbing shared by the spreadsheet reader and the dashboard:
//! XML event reading, ZIP part lookup and header/sheet-name normalization.
pub(crate) mod text;
pub(crate) mod xml;
pub(crate) mod zip;
