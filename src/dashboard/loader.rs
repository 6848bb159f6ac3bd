//! Locates the pickups and deliveries sections in an uploaded workbook.
use crate::config::DashboardConfig;
use crate::dashboard::Section;
use crate::error::DashboardError;
use crate::helpers::text::same_key;
use crate::spreadsheet::Table;
use crate::spreadsheet::Workbook;
use log::debug;

/// The two required section tables of a workbook.
#[derive(Debug)]
pub struct SectionTables<'a> {
    pub pickups: &'a Table,
    pub deliveries: &'a Table,
}

/// Finds the table for `section` by any accepted sheet name.
pub fn find_section<'a>(workbook: &'a Workbook, config: &DashboardConfig, section: Section) -> Option<&'a Table> {
    let layout = config.layout(section);
    workbook.tables.iter().find(|table| {
        layout.sheet_names.iter().any(|name| same_key(name, &table.name))
    })
}

/// Extracts both sections, failing with every absent section named at once.
pub fn load_sections<'a>(workbook: &'a Workbook, config: &DashboardConfig) -> Result<SectionTables<'a>, DashboardError> {
    let pickups = find_section(workbook, config, Section::Pickups);
    let deliveries = find_section(workbook, config, Section::Deliveries);
    match (pickups, deliveries) {
        (Some(pickups), Some(deliveries)) => {
            debug!("Section pickups is sheet '{}', deliveries is sheet '{}'", pickups.name, deliveries.name);
            Ok(SectionTables { pickups, deliveries })
        }
        (pickups, deliveries) => {
            let missing = [(Section::Pickups, pickups.is_none()), (Section::Deliveries, deliveries.is_none())]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(section, _)| section.as_str().to_owned())
                .collect();
            Err(DashboardError::MissingSectionError {
                missing,
                expected: Section::ALL.iter().map(|section| section.as_str().to_owned()).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook(names: &[&str]) -> Workbook {
        Workbook::new(names.iter().map(|name| Table::new(name, Vec::new(), Vec::new())).collect())
    }

    #[test]
    fn test_sections_match_any_spelling() {
        let workbook = workbook(&["Resumo", "COLETAS", " Entregas "]);
        let sections = load_sections(&workbook, &DashboardConfig::default()).unwrap();
        assert_eq!(sections.pickups.name, "COLETAS");
        assert_eq!(sections.deliveries.name, " Entregas ");

        let workbook = self::workbook(&["Deliveries", "Pickups"]);
        let sections = load_sections(&workbook, &DashboardConfig::default()).unwrap();
        assert_eq!(sections.pickups.name, "Pickups");
    }

    #[test]
    fn test_reports_every_missing_section() {
        let workbook = workbook(&["Resumo"]);
        let error = load_sections(&workbook, &DashboardConfig::default()).unwrap_err();
        match error {
            DashboardError::MissingSectionError { missing, expected } => {
                assert_eq!(missing, vec!["pickups", "deliveries"]);
                assert_eq!(expected, vec!["pickups", "deliveries"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_reports_single_missing_section() {
        let workbook = workbook(&["coletas"]);
        let error = load_sections(&workbook, &DashboardConfig::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Missing required sections: deliveries. Expected: pickups, deliveries"
        );
    }
}
