//! Filter pipeline: date range, service levels, region, dependent city and status.
//!
//! Filters only ever narrow the working set and compose as an intersection, so their
//! order changes the options offered at each stage but never the final view.
use crate::dashboard::records::SectionRecord;
use crate::dashboard::records::StatusField;
use crate::dashboard::session::MasterRecord;
use crate::dashboard::view::View;
use crate::dashboard::ALL_OPTION;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// A single-select filter value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Reads a dropdown label; [`ALL_OPTION`] means no filtering.
    pub fn parse(label: &str) -> Self {
        if label == ALL_OPTION {
            Self::All
        } else {
            Self::Only(label.to_owned())
        }
    }

    fn accept(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

/// A status dropdown value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusChoice {
    #[default]
    All,
    /// Only records showing the sentinel
    Sentinel,
    /// Only records with real data
    Present,
}

impl StatusChoice {
    /// Reads a dropdown label offered by [`status_options`].
    pub fn parse<S: StatusField>(status: S, label: &str) -> Option<Self> {
        if label == ALL_OPTION {
            Some(Self::All)
        } else if label == status.sentinel() {
            Some(Self::Sentinel)
        } else if label == status.present_label() {
            Some(Self::Present)
        } else {
            None
        }
    }
}

/// Dropdown labels of a status field: all, sentinel, present.
pub fn status_options<S: StatusField>(status: S) -> [&'static str; 3] {
    [ALL_OPTION, status.sentinel(), status.present_label()]
}

/// Inclusive date range with the "include records without date" switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub include_missing: bool,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate, include_missing: bool) -> Self {
        DateRange { start: Some(start), end: Some(end), include_missing }
    }

    /// No bounds, as when no valid date existed to seed the picker.
    pub fn unset(include_missing: bool) -> Self {
        DateRange { start: None, end: None, include_missing }
    }

    fn accept(&self, date: Option<NaiveDate>) -> bool {
        match (self.start, self.end, date) {
            (_, _, None) => self.include_missing,
            (Some(start), Some(end), Some(date)) => start <= date && date <= end,
            _ => true,
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unset(true)
    }
}

/// Everything the user selected for one section; rebuilt on every interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria<S> {
    pub date_range: DateRange,
    /// Empty means every service level passes
    pub service_levels: BTreeSet<String>,
    pub region: Choice,
    pub city: Choice,
    pub statuses: Vec<(S, StatusChoice)>,
}

impl<S> Default for FilterCriteria<S> {
    fn default() -> Self {
        FilterCriteria {
            date_range: DateRange::default(),
            service_levels: BTreeSet::new(),
            region: Choice::All,
            city: Choice::All,
            statuses: Vec::new(),
        }
    }
}

impl<S: StatusField> FilterCriteria<S> {
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_service_levels<I, T>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.service_levels = levels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_region(mut self, region: Choice) -> Self {
        self.region = region;
        self
    }

    pub fn with_city(mut self, city: Choice) -> Self {
        self.city = city;
        self
    }

    /// Sets the choice for one status field, replacing any earlier one.
    pub fn with_status(mut self, status: S, choice: StatusChoice) -> Self {
        self.statuses.retain(|(existing, _)| *existing != status);
        self.statuses.push((status, choice));
        self
    }

    /// The predicates of these criteria in pipeline order.
    pub fn filters<R: SectionRecord<Status = S>>(&self) -> Vec<Box<dyn RecordFilter<R> + '_>> {
        let mut filters: Vec<Box<dyn RecordFilter<R> + '_>> = vec![
            Box::new(DateRangeFilter(self.date_range)),
            Box::new(ServiceLevelFilter(&self.service_levels)),
            Box::new(RegionFilter(&self.region)),
            Box::new(CityFilter(&self.city)),
        ];
        for (status, choice) in &self.statuses {
            filters.push(Box::new(StatusFilter { status: *status, choice: *choice }));
        }
        filters
    }
}

/// A predicate over records of one section.
pub trait RecordFilter<R: SectionRecord> {
    fn accept(&self, record: &R) -> bool;
}

pub struct DateRangeFilter(pub DateRange);

impl<R: SectionRecord> RecordFilter<R> for DateRangeFilter {
    fn accept(&self, record: &R) -> bool {
        self.0.accept(record.filter_date())
    }
}

pub struct ServiceLevelFilter<'a>(pub &'a BTreeSet<String>);

impl<R: SectionRecord> RecordFilter<R> for ServiceLevelFilter<'_> {
    fn accept(&self, record: &R) -> bool {
        self.0.is_empty() || record.service_level().is_some_and(|level| self.0.contains(level))
    }
}

pub struct RegionFilter<'a>(pub &'a Choice);

impl<R: SectionRecord> RecordFilter<R> for RegionFilter<'_> {
    fn accept(&self, record: &R) -> bool {
        self.0.accept(record.region())
    }
}

pub struct CityFilter<'a>(pub &'a Choice);

impl<R: SectionRecord> RecordFilter<R> for CityFilter<'_> {
    fn accept(&self, record: &R) -> bool {
        self.0.accept(record.city())
    }
}

pub struct StatusFilter<S> {
    pub status: S,
    pub choice: StatusChoice,
}

impl<R: SectionRecord> RecordFilter<R> for StatusFilter<R::Status> {
    fn accept(&self, record: &R) -> bool {
        match self.choice {
            StatusChoice::All => true,
            StatusChoice::Sentinel => record.is_sentinel(self.status),
            StatusChoice::Present => !record.is_sentinel(self.status),
        }
    }
}

/// Runs `filters` in order over `rows`.
pub fn run_pipeline<'a, R: SectionRecord>(
    rows: Vec<&'a MasterRecord<R>>,
    filters: &[Box<dyn RecordFilter<R> + '_>],
) -> Vec<&'a MasterRecord<R>> {
    filters.iter().fold(rows, |rows, filter| {
        rows.into_iter().filter(|row| filter.accept(&row.record)).collect()
    })
}

/// Options a UI offers for each control, drawn from the stage before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Earliest and latest valid date of the master set
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    /// From the date-filtered subset
    pub service_levels: Vec<String>,
    /// From the service-level-filtered subset
    pub regions: Vec<String>,
    /// From the region-filtered subset
    pub cities: Vec<String>,
}

/// The result of one recomputation: the view plus the options behind it.
#[derive(Clone, Debug)]
pub struct FilteredView<'a, R> {
    pub view: View<'a, R>,
    pub options: FilterOptions,
}

fn distinct<'a, R: SectionRecord + 'a>(
    rows: &[&'a MasterRecord<R>],
    field: impl Fn(&'a R) -> Option<&'a str>,
) -> Vec<String> {
    rows.iter()
        .copied()
        .filter_map(|row| field(&row.record))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Recomputes the view of `records` under `criteria`, collecting dependent options.
pub fn apply_filters<'a, R: SectionRecord>(
    records: &'a [MasterRecord<R>],
    criteria: &FilterCriteria<R::Status>,
) -> FilteredView<'a, R> {
    let dates = records.iter().filter_map(|row| row.record.filter_date());
    let date_bounds = dates.clone().min().zip(dates.max());

    let filters = criteria.filters::<R>();
    let (date, rest) = filters.split_at(1);
    let rows = run_pipeline(records.iter().collect(), date);
    let service_levels = distinct(&rows, |record| record.service_level());

    let (category, rest) = rest.split_at(1);
    let rows = run_pipeline(rows, category);
    let regions = distinct(&rows, |record| record.region());

    let (region, rest) = rest.split_at(1);
    let rows = run_pipeline(rows, region);
    let cities = distinct(&rows, |record| record.city());

    let rows = run_pipeline(rows, rest);
    FilteredView {
        view: View::new(rows),
        options: FilterOptions { date_bounds, service_levels, regions, cities },
    }
}
