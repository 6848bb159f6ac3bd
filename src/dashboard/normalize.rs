//! Record normalization: resolved raw columns to display-ready records.
use crate::config::fields;
use crate::config::DashboardConfig;
use crate::dashboard::headers::resolve_columns;
use crate::dashboard::headers::ResolvedColumns;
use crate::dashboard::records::DeliveryRecord;
use crate::dashboard::records::PickupRecord;
use crate::dashboard::records::NOT_DELIVERED;
use crate::dashboard::records::NOT_PICKED_UP;
use crate::dashboard::records::NO_ORDER_NUMBER;
use crate::dashboard::Section;
use crate::error::DashboardError;
use crate::spreadsheet::Table;
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Hardcode regex pattern"));

/// Reads resolved columns of one table row.
struct RowReader<'a> {
    table: &'a Table,
    columns: &'a ResolvedColumns,
    date_formats: &'a [String],
    row: usize,
}

impl RowReader<'_> {
    fn text(&self, canonical: &str) -> Option<String> {
        let col = self.columns.index(canonical)?;
        self.table.cell(self.row, col)?.to_text()
    }

    /// Parses a date, downgrading anything unparseable to `None`.
    fn date(&self, canonical: &str) -> Option<NaiveDate> {
        let col = self.columns.index(canonical)?;
        let cell = self.table.cell(self.row, col)?;
        let date = cell.to_date(self.date_formats);
        if date.is_none() {
            debug!("'{}'!{} value '{}' is not a date, treated as missing", self.table.name, cell.reference(), cell.value);
        }
        date
    }
}

/// Formats a date as `YYYY-MM-DD`, or the sentinel when missing.
pub fn date_label(date: Option<NaiveDate>, sentinel: &str) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| sentinel.to_owned())
}

/// Joins origin and destination into a single label, missing parts as empty text,
/// with whitespace runs collapsed and the ends trimmed.
pub fn route_label(
    origin_city: Option<&str>,
    origin_region: Option<&str>,
    destination_city: Option<&str>,
    destination_region: Option<&str>,
) -> String {
    let label = format!(
        "{} / {}  →  {} / {}",
        origin_city.unwrap_or_default(),
        origin_region.unwrap_or_default(),
        destination_city.unwrap_or_default(),
        destination_region.unwrap_or_default(),
    );
    WHITESPACE.replace_all(&label, " ").trim().to_owned()
}

/// Normalizes the pickups table.
pub fn normalize_pickups(table: &Table, config: &DashboardConfig) -> Result<Vec<PickupRecord>, DashboardError> {
    let columns = resolve_columns(Section::Pickups.as_str(), &table.headers, &config.pickups.fields)?;
    let records = (0..table.rows.len())
        .map(|row| {
            let reader = RowReader { table, columns: &columns, date_formats: &config.date_formats, row };
            let pickup_date = reader.date(fields::PICKUP_DATE);
            let order_number = reader
                .text(fields::ORDER_NUMBER)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| NO_ORDER_NUMBER.to_owned());
            PickupRecord {
                origin_city: reader.text(fields::ORIGIN_CITY),
                destination_city: reader.text(fields::DESTINATION_CITY),
                dtm: reader.text(fields::DTM),
                origin_company: reader.text(fields::ORIGIN_COMPANY),
                origin_region: reader.text(fields::ORIGIN_REGION),
                service_level: reader.text(fields::SERVICE_LEVEL),
                order_number,
                pickup_date,
                pickup_date_label: date_label(pickup_date, NOT_PICKED_UP),
            }
        })
        .collect();
    Ok(records)
}

/// Normalizes the deliveries table.
pub fn normalize_deliveries(table: &Table, config: &DashboardConfig) -> Result<Vec<DeliveryRecord>, DashboardError> {
    let columns = resolve_columns(Section::Deliveries.as_str(), &table.headers, &config.deliveries.fields)?;
    let records = (0..table.rows.len())
        .map(|row| {
            let reader = RowReader { table, columns: &columns, date_formats: &config.date_formats, row };
            let origin_city = reader.text(fields::ORIGIN_CITY);
            let origin_region = reader.text(fields::ORIGIN_REGION);
            let destination_city = reader.text(fields::DESTINATION_CITY);
            let destination_region = reader.text(fields::DESTINATION_REGION);
            let delivery_date = reader.date(fields::DELIVERY_DATE);
            DeliveryRecord {
                route: route_label(
                    origin_city.as_deref(),
                    origin_region.as_deref(),
                    destination_city.as_deref(),
                    destination_region.as_deref(),
                ),
                origin_city,
                origin_region,
                destination_city,
                destination_region,
                dtm: reader.text(fields::DTM),
                service_level: reader.text(fields::SERVICE_LEVEL),
                destination_company: reader.text(fields::DESTINATION_COMPANY),
                shipment: reader.text(fields::SHIPMENT),
                cte: reader.text(fields::CTE),
                expected_delivery: reader.date(fields::EXPECTED_DELIVERY),
                delivery_date,
                delivery_date_label: date_label(delivery_date, NOT_DELIVERED),
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::Cell;

    fn pickups_table(rows: Vec<Vec<Option<Cell>>>) -> Table {
        let headers = ["CIDADE ORIGEM", "CIDADE DESTINO", "DTM", "EMPRESA ORIGEM", "OS", "DATA COLETA", "NÍVEL DE SERVIÇO", "UF ORIGEM"];
        Table::new("coletas", headers.iter().map(|it| it.to_string()).collect(), rows)
    }

    fn text(value: &str) -> Option<Cell> {
        Some(Cell::text(value))
    }

    #[test]
    fn test_pickup_sentinels() {
        let table = pickups_table(vec![
            vec![text("Macaé"), text("Vitória"), text("D-1"), text("Petrobras"), text("   "), None, text("Express"), text("RJ")],
            vec![text("Macaé"), text("Santos"), text("D-2"), text("Petrobras"), Some(Cell::number(4512.0)), text("05/03/2024"), None, text("RJ")],
        ]);
        let records = normalize_pickups(&table, &DashboardConfig::default()).unwrap();
        assert_eq!(records[0].order_number, NO_ORDER_NUMBER);
        assert_eq!(records[0].pickup_date, None);
        assert_eq!(records[0].pickup_date_label, NOT_PICKED_UP);
        assert_eq!(records[1].order_number, "4512");
        assert_eq!(records[1].pickup_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(records[1].pickup_date_label, "2024-03-05");
        assert_eq!(records[1].service_level, None);
    }

    #[test]
    fn test_malformed_date_is_missing() {
        let table = pickups_table(vec![
            vec![text("Macaé"), None, None, None, text("77"), text("next week"), None, None],
        ]);
        let records = normalize_pickups(&table, &DashboardConfig::default()).unwrap();
        assert_eq!(records[0].pickup_date, None);
        assert_eq!(records[0].pickup_date_label, NOT_PICKED_UP);
    }

    #[test]
    fn test_missing_columns_fail_the_section() {
        let table = Table::new("coletas", vec!["DTM".to_owned()], Vec::new());
        let error = normalize_pickups(&table, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(error, DashboardError::MissingColumnError { ref missing, .. } if missing.len() == 7));
    }

    #[test]
    fn test_route_label() {
        assert_eq!(route_label(Some("Macaé"), Some("RJ"), Some("Vitória"), Some("ES")), "Macaé / RJ → Vitória / ES");
        assert_eq!(route_label(Some("Macaé"), Some("RJ"), Some("Vitória"), None), "Macaé / RJ → Vitória /");
        assert_eq!(route_label(None, Some("RJ"), Some(" São  Paulo "), Some("SP")), "/ RJ → São Paulo / SP");
        assert_eq!(route_label(None, None, None, None), "/ → /");
        for label in [
            route_label(Some("A"), None, Some("B"), Some("C")),
            route_label(Some("A"), Some("B"), None, Some("C")),
            route_label(Some("A"), Some("B"), Some("C"), None),
        ] {
            assert!(!label.contains("  "), "{label}");
            assert_eq!(label, label.trim());
        }
    }

    #[test]
    fn test_deliveries() {
        let headers = [
            "CIDADE ORIGEM", "UF ORIGEM", "CIDADE DESTINO", "UF DESTINO", "DTM", "NIVEL DE SERVICO",
            "EMPRESA DESTINO", "PREVISAO DE ENTREGA", "DATA DE ENTREGA", "EMBARQUE", "CTE",
        ];
        let table = Table::new(
            "entregas",
            headers.iter().map(|it| it.to_string()).collect(),
            vec![vec![
                text("Macaé"), text("RJ"), text("Vitória"), text("ES"), text("D-9"), text("Standard"),
                text("Porto"), Some(Cell::date(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap())), text("n/a"),
                text("E-1"), Some(Cell::number(991.0)),
            ]],
        );
        let records = normalize_deliveries(&table, &DashboardConfig::default()).unwrap();
        let record = &records[0];
        assert_eq!(record.route, "Macaé / RJ → Vitória / ES");
        assert_eq!(record.expected_delivery, NaiveDate::from_ymd_opt(2024, 3, 8));
        assert_eq!(record.delivery_date, None);
        assert_eq!(record.delivery_date_label, NOT_DELIVERED);
        assert_eq!(record.cte.as_deref(), Some("991"));
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(NaiveDate::from_ymd_opt(2024, 12, 1), NOT_DELIVERED), "2024-12-01");
        assert_eq!(date_label(None, NOT_DELIVERED), NOT_DELIVERED);
    }
}
