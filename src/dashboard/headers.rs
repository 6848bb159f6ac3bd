//! Header resolution: finds the real column behind each canonical field.
use crate::config::FieldCandidates;
use crate::error::DashboardError;
use crate::helpers::text::normalize_key;
use std::collections::HashMap;

/// A canonical field matched to a real header.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColumn {
    pub canonical: String,
    /// Header text exactly as it appears in the upload
    pub header: String,
    /// Column position within the table
    pub index: usize,
}

/// The outcome of a successful resolution: exactly one column per canonical field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedColumns {
    columns: Vec<ResolvedColumn>,
}

impl ResolvedColumns {
    pub fn get(&self, canonical: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|column| column.canonical == canonical)
    }

    pub fn index(&self, canonical: &str) -> Option<usize> {
        self.get(canonical).map(|column| column.index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.columns.iter()
    }
}

/// Resolves every canonical field of `fields` against `headers`.
///
/// Headers and candidates are compared by their normalized key. Candidates are tried
/// in order and the first one present wins; when two headers share a key the leftmost
/// column is used. All unmatched canonical fields are reported together.
pub fn resolve_columns(section: &str, headers: &[String], fields: &[FieldCandidates]) -> Result<ResolvedColumns, DashboardError> {
    let mut keys = HashMap::<String, usize>::new();
    for (index, header) in headers.iter().enumerate() {
        keys.entry(normalize_key(header)).or_insert(index);
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut missing = Vec::new();
    for field in fields {
        let found = field
            .candidates
            .iter()
            .find_map(|candidate| keys.get(&normalize_key(candidate)).copied());
        match found {
            Some(index) => columns.push(ResolvedColumn {
                canonical: field.canonical.to_owned(),
                header: headers[index].to_owned(),
                index,
            }),
            None => missing.push(field.canonical.to_owned()),
        }
    }

    if missing.is_empty() {
        Ok(ResolvedColumns { columns })
    } else {
        Err(DashboardError::MissingColumnError {
            section: section.to_owned(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields;
    use crate::config::SectionLayout;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|it| it.to_string()).collect()
    }

    #[test]
    fn test_spelling_variants_resolve_identically() {
        let layout = SectionLayout::pickups();
        let variants = [
            ["CIDADE ORIGEM", "CIDADE DESTINO", "DTM", "EMPRESA ORIGEM", "OS", "DATA COLETA", "NÍVEL DE SERVIÇO", "UF ORIGEM"],
            ["cidade origem", "Cidade  Destino", " dtm ", "EMPRESA\tORIGEM", "os", "data coleta", "nivel de servico", "uf origem"],
            ["CIDADE   ORIGEM", "CIDADE DESTINO", "DTM", "Empresa Origem", "OS", "DATA  COLETA", "NÍVEL DE SERVÍÇO", "UF ORIGEM"],
        ];
        let resolved: Vec<Vec<(String, usize)>> = variants
            .iter()
            .map(|names| {
                resolve_columns("pickups", &headers(names), &layout.fields)
                    .unwrap()
                    .iter()
                    .map(|column| (column.canonical.to_owned(), column.index))
                    .collect()
            })
            .collect();
        assert_eq!(resolved[0], resolved[1]);
        assert_eq!(resolved[0], resolved[2]);
    }

    #[test]
    fn test_returns_real_header_text() {
        let layout = SectionLayout::deliveries();
        let names = [
            "Cidade Origem", "UF Origem", "Cidade Destino", "UF Destino", "DTM", "Nivel Servico",
            "Empresa Destino", "Previsão Entrega", "Data Entrega", "Embarque", "CTe",
        ];
        let columns = resolve_columns("deliveries", &headers(&names), &layout.fields).unwrap();
        let expected = columns.get(fields::EXPECTED_DELIVERY).unwrap();
        assert_eq!(expected.header, "Previsão Entrega");
        assert_eq!(expected.index, 7);
        assert_eq!(columns.index(fields::CTE), Some(10));
        assert_eq!(columns.iter().count(), 11);
    }

    #[test]
    fn test_reports_every_missing_field() {
        let layout = SectionLayout::pickups();
        let names = ["CIDADE ORIGEM", "CIDADE DESTINO", "EMPRESA ORIGEM", "OS", "DATA COLETA", "NIVEL SERVICO"];
        let error = resolve_columns("pickups", &headers(&names), &layout.fields).unwrap_err();
        match error {
            DashboardError::MissingColumnError { section, missing } => {
                assert_eq!(section, "pickups");
                assert_eq!(missing, vec![fields::DTM, fields::ORIGIN_REGION]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_first_candidate_and_leftmost_column_win() {
        let fields = vec![FieldCandidates::new("DATE", &["DATA DE COLETA", "DATA COLETA"])];
        let columns = resolve_columns("pickups", &headers(&["DATA COLETA", "data de coleta", "DATA DE COLETA"]), &fields).unwrap();
        assert_eq!(columns.index("DATE"), Some(1));
    }
}
