//! Counters shown above each table and in the upload overview.
use crate::dashboard::records::DeliveryRecord;
use crate::dashboard::records::PickupRecord;
use crate::dashboard::records::SectionRecord;
use crate::dashboard::records::StatusField;
use crate::dashboard::session::RecordSet;
use crate::dashboard::view::View;
use std::collections::HashSet;

/// Counts over the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    /// Distinct non-null DTMs
    pub distinct_groups: usize,
    /// Distinct non-null service levels
    pub distinct_service_levels: usize,
    /// Records showing each status sentinel, as (sentinel, count)
    pub sentinels: Vec<(&'static str, usize)>,
}

impl Summary {
    /// Count of records showing `sentinel`, zero when unknown.
    pub fn sentinel_count(&self, sentinel: &str) -> usize {
        self.sentinels
            .iter()
            .find(|(label, _)| *label == sentinel)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

fn distinct_count<'a>(values: impl Iterator<Item = Option<&'a str>>) -> usize {
    values.flatten().collect::<HashSet<_>>().len()
}

/// Summarizes a view. Pure function of the rows it holds.
pub fn summarize<R: SectionRecord>(view: &View<'_, R>) -> Summary {
    let sentinels = <R::Status as StatusField>::ALL
        .iter()
        .map(|status| {
            let count = view.records().filter(|record| record.is_sentinel(*status)).count();
            (status.sentinel(), count)
        })
        .collect();
    Summary {
        records: view.len(),
        distinct_groups: distinct_count(view.records().map(|record| record.group_key())),
        distinct_service_levels: distinct_count(view.records().map(|record| record.service_level())),
        sentinels,
    }
}

/// Size of the uploaded file's master sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overview {
    pub pickup_rows: usize,
    pub delivery_rows: usize,
    pub pickup_groups: usize,
    pub delivery_groups: usize,
}

impl Overview {
    pub fn new(pickups: &RecordSet<PickupRecord>, deliveries: &RecordSet<DeliveryRecord>) -> Self {
        Overview {
            pickup_rows: pickups.len(),
            delivery_rows: deliveries.len(),
            pickup_groups: distinct_count(pickups.records().iter().map(|row| row.record.group_key())),
            delivery_groups: distinct_count(deliveries.records().iter().map(|row| row.record.group_key())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::filter::FilterCriteria;
    use crate::dashboard::records::NOT_PICKED_UP;
    use crate::dashboard::records::NO_ORDER_NUMBER;

    fn pickup(dtm: Option<&str>, level: Option<&str>, order: &str, date_label: &str) -> PickupRecord {
        PickupRecord {
            origin_city: None,
            destination_city: None,
            dtm: dtm.map(str::to_owned),
            origin_company: None,
            origin_region: None,
            service_level: level.map(str::to_owned),
            order_number: order.to_owned(),
            pickup_date: None,
            pickup_date_label: date_label.to_owned(),
        }
    }

    #[test]
    fn test_summarize() {
        let master = RecordSet::new(vec![
            pickup(Some("D-1"), Some("Express"), "10", "2024-03-01"),
            pickup(Some("D-1"), Some("Standard"), NO_ORDER_NUMBER, NOT_PICKED_UP),
            pickup(None, None, NO_ORDER_NUMBER, "2024-03-02"),
            pickup(Some("D-2"), Some("Express"), "11", NOT_PICKED_UP),
        ]);
        let filtered = master.view(&FilterCriteria::default());
        let summary = summarize(&filtered.view);
        assert_eq!(summary.records, 4);
        assert_eq!(summary.distinct_groups, 2);
        assert_eq!(summary.distinct_service_levels, 2);
        assert_eq!(summary.sentinel_count(NO_ORDER_NUMBER), 2);
        assert_eq!(summary.sentinel_count(NOT_PICKED_UP), 2);
        assert_eq!(summary.sentinel_count("not delivered"), 0);
    }

    #[test]
    fn test_empty_view() {
        let master = RecordSet::<PickupRecord>::new(Vec::new());
        let summary = summarize(&master.view(&FilterCriteria::default()).view);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.distinct_groups, 0);
        assert_eq!(summary.sentinels, vec![(NO_ORDER_NUMBER, 0), (NOT_PICKED_UP, 0)]);
    }
}
