//! Dashboard configuration: where each section lives in the upload, which header
//! spellings satisfy each canonical field and which text date formats are accepted.
use crate::dashboard::Section;

/// Text date formats tried in order.
///
/// Slash dates are day-first, the way the daily files are typed: `05/03/2024` is
/// 5 March. A month-first reading (3 May) is deliberately not offered.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d",
];

/// Canonical field names shared by both sections.
pub mod fields {
    pub const ORIGIN_CITY: &str = "ORIGIN_CITY";
    pub const ORIGIN_REGION: &str = "ORIGIN_REGION";
    pub const DESTINATION_CITY: &str = "DESTINATION_CITY";
    pub const DESTINATION_REGION: &str = "DESTINATION_REGION";
    pub const DTM: &str = "DTM";
    pub const SERVICE_LEVEL: &str = "SERVICE_LEVEL";
    pub const ORIGIN_COMPANY: &str = "ORIGIN_COMPANY";
    pub const DESTINATION_COMPANY: &str = "DESTINATION_COMPANY";
    pub const ORDER_NUMBER: &str = "ORDER_NUMBER";
    pub const PICKUP_DATE: &str = "PICKUP_DATE";
    pub const EXPECTED_DELIVERY: &str = "EXPECTED_DELIVERY";
    pub const DELIVERY_DATE: &str = "DELIVERY_DATE";
    pub const SHIPMENT: &str = "SHIPMENT";
    pub const CTE: &str = "CTE";
}

/// A canonical field with the header spellings accepted for it, in priority order.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCandidates {
    pub canonical: String,
    pub candidates: Vec<String>,
}

impl FieldCandidates {
    pub fn new(canonical: &str, candidates: &[&str]) -> Self {
        FieldCandidates {
            canonical: canonical.to_owned(),
            candidates: candidates.iter().map(|it| it.to_string()).collect(),
        }
    }
}

/// Where a section is found and how its header is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub section: Section,
    /// Accepted sheet names, compared after normalization
    pub sheet_names: Vec<String>,
    pub fields: Vec<FieldCandidates>,
}

impl SectionLayout {
    pub fn pickups() -> Self {
        use fields::*;
        SectionLayout {
            section: Section::Pickups,
            sheet_names: vec!["pickups".to_owned(), "coletas".to_owned()],
            fields: vec![
                FieldCandidates::new(ORIGIN_CITY, &["CIDADE ORIGEM", "ORIGIN CITY"]),
                FieldCandidates::new(DESTINATION_CITY, &["CIDADE DESTINO", "DESTINATION CITY"]),
                FieldCandidates::new(DTM, &["DTM"]),
                FieldCandidates::new(ORIGIN_COMPANY, &["EMPRESA ORIGEM", "ORIGIN COMPANY"]),
                FieldCandidates::new(ORDER_NUMBER, &["OS", "ORDER NUMBER"]),
                FieldCandidates::new(PICKUP_DATE, &["DATA COLETA", "DATA DE COLETA", "PICKUP DATE"]),
                FieldCandidates::new(SERVICE_LEVEL, SERVICE_LEVEL_SPELLINGS),
                FieldCandidates::new(ORIGIN_REGION, &["UF ORIGEM", "ORIGIN REGION"]),
            ],
        }
    }

    pub fn deliveries() -> Self {
        use fields::*;
        SectionLayout {
            section: Section::Deliveries,
            sheet_names: vec!["deliveries".to_owned(), "entregas".to_owned()],
            fields: vec![
                FieldCandidates::new(ORIGIN_CITY, &["CIDADE ORIGEM", "ORIGIN CITY"]),
                FieldCandidates::new(ORIGIN_REGION, &["UF ORIGEM", "ORIGIN REGION"]),
                FieldCandidates::new(DESTINATION_CITY, &["CIDADE DESTINO", "DESTINATION CITY"]),
                FieldCandidates::new(DESTINATION_REGION, &["UF DESTINO", "DESTINATION REGION"]),
                FieldCandidates::new(DTM, &["DTM"]),
                FieldCandidates::new(SERVICE_LEVEL, SERVICE_LEVEL_SPELLINGS),
                FieldCandidates::new(DESTINATION_COMPANY, &["EMPRESA DESTINO", "DESTINATION COMPANY"]),
                FieldCandidates::new(
                    EXPECTED_DELIVERY,
                    &["PREVISÃO DE ENTREGA", "PREVISAO DE ENTREGA", "PREVISAO ENTREGA", "PREVISÃO ENTREGA", "EXPECTED DELIVERY"],
                ),
                FieldCandidates::new(DELIVERY_DATE, &["DATA DE ENTREGA", "DATA ENTREGA", "DELIVERY DATE"]),
                FieldCandidates::new(SHIPMENT, &["EMBARQUE", "SHIPMENT"]),
                FieldCandidates::new(CTE, &["CTE"]),
            ],
        }
    }

    /// Accepts one more header spelling for `canonical`; unknown fields are added.
    pub fn with_candidate(mut self, canonical: &str, spelling: &str) -> Self {
        match self.fields.iter_mut().find(|field| field.canonical == canonical) {
            Some(field) => field.candidates.push(spelling.to_owned()),
            None => self.fields.push(FieldCandidates::new(canonical, &[spelling])),
        }
        self
    }

    /// Accepts one more sheet name for the section.
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_names.push(name.to_owned());
        self
    }
}

const SERVICE_LEVEL_SPELLINGS: &[&str] = &[
    "NIVEL DE SERVIÇO",
    "NÍVEL DE SERVIÇO",
    "NIVEL DE SERVICO",
    "NIVEL SERVICO",
    "SERVICE LEVEL",
];

/// Everything the session store needs to turn an upload into master record sets.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    pub pickups: SectionLayout,
    pub deliveries: SectionLayout,
    pub date_formats: Vec<String>,
}

impl DashboardConfig {
    pub fn layout(&self, section: Section) -> &SectionLayout {
        match section {
            Section::Pickups => &self.pickups,
            Section::Deliveries => &self.deliveries,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            pickups: SectionLayout::pickups(),
            deliveries: SectionLayout::deliveries(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|it| it.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layouts() {
        let config = DashboardConfig::default();
        assert_eq!(config.layout(Section::Pickups).fields.len(), 8);
        assert_eq!(config.layout(Section::Deliveries).fields.len(), 11);
        assert_eq!(config.date_formats.len(), DEFAULT_DATE_FORMATS.len());
    }

    #[test]
    fn test_slash_dates_are_day_first() {
        let parsed = DEFAULT_DATE_FORMATS
            .iter()
            .find_map(|format| chrono::NaiveDate::parse_from_str("05/03/2024", format).ok());
        assert_eq!(parsed, chrono::NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn test_with_candidate() {
        let layout = SectionLayout::pickups()
            .with_candidate(fields::ORDER_NUMBER, "Nº OS")
            .with_candidate("DRIVER", "MOTORISTA")
            .with_sheet_name("recolhas");
        let order = layout.fields.iter().find(|field| field.canonical == fields::ORDER_NUMBER).unwrap();
        assert_eq!(order.candidates, vec!["OS", "ORDER NUMBER", "Nº OS"]);
        assert_eq!(layout.fields.last().unwrap().canonical, "DRIVER");
        assert_eq!(layout.sheet_names, vec!["pickups", "coletas", "recolhas"]);
    }
}
