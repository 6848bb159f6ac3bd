//! # Dashboard Core Module
//!
//! Turns an uploaded daily workbook into two filterable, annotatable record sets:
//!
//! upload → [`headers`] → [`loader`] → [`normalize`] → [`session`] (master) →
//! [`filter`] → [`summary`] / display → [`annotation`] → [`export`]
//!
//! Every interaction recomputes a view from the master record set and the current
//! filter criteria. Only annotation sync and a new upload mutate the master.
use std::fmt::Display;

pub mod annotation;
pub mod export;
pub mod filter;
pub mod headers;
pub mod loader;
pub mod normalize;
pub mod records;
pub mod session;
pub mod summary;
pub mod view;

/// Option label that disables a single-select filter.
pub const ALL_OPTION: &str = "(all)";

/// The two sections every daily upload carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Pickups,
    Deliveries,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Pickups, Section::Deliveries];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pickups => "pickups",
            Self::Deliveries => "deliveries",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
