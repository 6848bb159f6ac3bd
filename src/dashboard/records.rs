//! Display-ready records of each section and the status dimensions they expose.
use crate::dashboard::Section;
use chrono::NaiveDate;
use std::fmt::Debug;

/// Sentinel shown when a pickup has no order number.
pub const NO_ORDER_NUMBER: &str = "no order number";
/// Sentinel shown when a pickup has no pickup date.
pub const NOT_PICKED_UP: &str = "not yet picked up";
/// Sentinel shown when a delivery has no delivery date.
pub const NOT_DELIVERED: &str = "not delivered";

/// A display field whose value is either a sentinel label or real data.
pub trait StatusField: Copy + Eq + Debug + 'static {
    /// Every status dimension of the section
    const ALL: &'static [Self];

    /// Display column the status is read from
    fn column(&self) -> &'static str;

    /// Label substituted for missing data
    fn sentinel(&self) -> &'static str;

    /// Option label selecting records that have real data
    fn present_label(&self) -> &'static str;
}

/// Behaviour shared by pickup and delivery records.
pub trait SectionRecord: Clone + Debug {
    type Status: StatusField;

    const SECTION: Section;

    /// Display column headers, in display order
    const COLUMNS: &'static [&'static str];

    /// Display strings, one per entry of [`Self::COLUMNS`]
    fn display_row(&self) -> Vec<String>;

    /// Parsed date the date-range filter applies to
    fn filter_date(&self) -> Option<NaiveDate>;

    fn service_level(&self) -> Option<&str>;

    fn region(&self) -> Option<&str>;

    fn city(&self) -> Option<&str>;

    /// Grouping key counted distinctly in summaries (the DTM)
    fn group_key(&self) -> Option<&str>;

    /// Current display value of a status field
    fn status_label(&self, status: Self::Status) -> &str;

    fn is_sentinel(&self, status: Self::Status) -> bool {
        self.status_label(status) == status.sentinel()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickupStatus {
    OrderNumber,
    PickupDate,
}

impl StatusField for PickupStatus {
    const ALL: &'static [Self] = &[Self::OrderNumber, Self::PickupDate];

    fn column(&self) -> &'static str {
        match self {
            Self::OrderNumber => "ORDER NUMBER",
            Self::PickupDate => "PICKUP DATE",
        }
    }

    fn sentinel(&self) -> &'static str {
        match self {
            Self::OrderNumber => NO_ORDER_NUMBER,
            Self::PickupDate => NOT_PICKED_UP,
        }
    }

    fn present_label(&self) -> &'static str {
        match self {
            Self::OrderNumber => "has order number",
            Self::PickupDate => "has pickup date recorded",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    DeliveryDate,
}

impl StatusField for DeliveryStatus {
    const ALL: &'static [Self] = &[Self::DeliveryDate];

    fn column(&self) -> &'static str {
        "DELIVERY DATE"
    }

    fn sentinel(&self) -> &'static str {
        NOT_DELIVERED
    }

    fn present_label(&self) -> &'static str {
        "delivered"
    }
}

/// One row of the pickups section.
#[derive(Clone, Debug, PartialEq)]
pub struct PickupRecord {
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub dtm: Option<String>,
    pub origin_company: Option<String>,
    pub origin_region: Option<String>,
    pub service_level: Option<String>,
    /// Order number, or [`NO_ORDER_NUMBER`]
    pub order_number: String,
    pub pickup_date: Option<NaiveDate>,
    /// ISO date, or [`NOT_PICKED_UP`]
    pub pickup_date_label: String,
}

impl SectionRecord for PickupRecord {
    type Status = PickupStatus;

    const SECTION: Section = Section::Pickups;

    const COLUMNS: &'static [&'static str] = &[
        "ORIGIN CITY",
        "DESTINATION CITY",
        "DTM",
        "ORIGIN COMPANY",
        "ORDER NUMBER",
        "PICKUP DATE",
    ];

    fn display_row(&self) -> Vec<String> {
        vec![
            self.origin_city.clone().unwrap_or_default(),
            self.destination_city.clone().unwrap_or_default(),
            self.dtm.clone().unwrap_or_default(),
            self.origin_company.clone().unwrap_or_default(),
            self.order_number.clone(),
            self.pickup_date_label.clone(),
        ]
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.pickup_date
    }

    fn service_level(&self) -> Option<&str> {
        self.service_level.as_deref()
    }

    fn region(&self) -> Option<&str> {
        self.origin_region.as_deref()
    }

    fn city(&self) -> Option<&str> {
        self.origin_city.as_deref()
    }

    fn group_key(&self) -> Option<&str> {
        self.dtm.as_deref()
    }

    fn status_label(&self, status: PickupStatus) -> &str {
        match status {
            PickupStatus::OrderNumber => &self.order_number,
            PickupStatus::PickupDate => &self.pickup_date_label,
        }
    }
}

/// One row of the deliveries section.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryRecord {
    /// `origin city / region → destination city / region`
    pub route: String,
    pub origin_city: Option<String>,
    pub origin_region: Option<String>,
    pub destination_city: Option<String>,
    pub destination_region: Option<String>,
    pub dtm: Option<String>,
    pub service_level: Option<String>,
    pub destination_company: Option<String>,
    pub shipment: Option<String>,
    pub cte: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    /// ISO date, or [`NOT_DELIVERED`]
    pub delivery_date_label: String,
}

impl SectionRecord for DeliveryRecord {
    type Status = DeliveryStatus;

    const SECTION: Section = Section::Deliveries;

    const COLUMNS: &'static [&'static str] = &[
        "ORIGIN → DESTINATION",
        "DTM",
        "SERVICE LEVEL",
        "DESTINATION COMPANY",
        "DELIVERY DATE",
        "SHIPMENT",
        "CTE",
    ];

    fn display_row(&self) -> Vec<String> {
        vec![
            self.route.clone(),
            self.dtm.clone().unwrap_or_default(),
            self.service_level.clone().unwrap_or_default(),
            self.destination_company.clone().unwrap_or_default(),
            self.delivery_date_label.clone(),
            self.shipment.clone().unwrap_or_default(),
            self.cte.clone().unwrap_or_default(),
        ]
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.expected_delivery
    }

    fn service_level(&self) -> Option<&str> {
        self.service_level.as_deref()
    }

    fn region(&self) -> Option<&str> {
        self.destination_region.as_deref()
    }

    fn city(&self) -> Option<&str> {
        self.destination_city.as_deref()
    }

    fn group_key(&self) -> Option<&str> {
        self.dtm.as_deref()
    }

    fn status_label(&self, _status: DeliveryStatus) -> &str {
        &self.delivery_date_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_columns_are_display_columns() {
        for status in PickupStatus::ALL {
            assert!(PickupRecord::COLUMNS.contains(&status.column()));
        }
        for status in DeliveryStatus::ALL {
            assert!(DeliveryRecord::COLUMNS.contains(&status.column()));
        }
    }

    #[test]
    fn test_pickup_display_row() {
        let record = PickupRecord {
            origin_city: Some("Macaé".to_owned()),
            destination_city: None,
            dtm: Some("D-7".to_owned()),
            origin_company: Some("Petrobras".to_owned()),
            origin_region: Some("RJ".to_owned()),
            service_level: Some("Express".to_owned()),
            order_number: NO_ORDER_NUMBER.to_owned(),
            pickup_date: None,
            pickup_date_label: NOT_PICKED_UP.to_owned(),
        };
        assert_eq!(
            record.display_row(),
            vec!["Macaé", "", "D-7", "Petrobras", NO_ORDER_NUMBER, NOT_PICKED_UP]
        );
        assert_eq!(record.display_row().len(), PickupRecord::COLUMNS.len());
        assert!(record.is_sentinel(PickupStatus::OrderNumber));
        assert!(record.is_sentinel(PickupStatus::PickupDate));
        assert_eq!(record.region(), Some("RJ"));
        assert_eq!(record.city(), Some("Macaé"));
    }
}
