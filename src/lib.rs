//! # Shipments Dashboard
//!
//! Core of a single-user dashboard over a daily logistics workbook with two sections,
//! pickups and deliveries.
//!
//! ## Features
//!
//! - **Workbook upload**: Reads `.xlsx` files directly from their bytes, locating each
//!   section by sheet name
//! - **Header resolution**: Matches canonical fields against the header row, tolerating
//!   case, accents and extra whitespace
//! - **Normalization**: Typed records with sentinel labels for missing order numbers and dates
//! - **Filtering**: Date range, service levels, region, dependent city and status filters,
//!   each stage narrowing the options of the next
//! - **Annotations**: Free-text notes edited on any view and kept on the master record
//!   for the life of the upload
//! - **Export**: The current view, notes included, as a downloadable workbook
//!
//! ## Example
//!
//! ```no_run
//! use rusty_shipments::dashboard::filter::FilterCriteria;
//! use rusty_shipments::SessionStore;
//! use rusty_shipments::Upload;
//!
//! let bytes = std::fs::read("daily.xlsx")?;
//! let mut store = SessionStore::default();
//! let session = store.load(&Upload::new("daily.xlsx", bytes))?;
//! let pickups = session.pickups.view(&FilterCriteria::default());
//! println!("{} pickups", pickups.view.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod config;
pub mod dashboard;
pub mod error;
mod helpers;
pub mod spreadsheet;

pub use crate::config::DashboardConfig;
pub use crate::dashboard::session::Session;
pub use crate::dashboard::session::SessionStore;
pub use crate::dashboard::session::Upload;
pub use crate::dashboard::Section;
pub use crate::error::DashboardError;
pub use crate::spreadsheet::Workbook;
