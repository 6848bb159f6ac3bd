//! Text normalization for matching headers and sheet names typed by hand.

/// Folds a header or sheet name into its comparison key.
///
/// Lower-cases, strips, collapses whitespace runs into one space and replaces
/// the accented Latin letters found in Portuguese spreadsheets with their
/// unaccented equivalents. The degree sign folds to `o` so `N°` matches `No`.
pub(crate) fn normalize_key(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .chars()
        .map(|character| match character {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' | '°' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            _ => character,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true when both strings fold to the same key.
pub(crate) fn same_key(left: &str, right: &str) -> bool {
    normalize_key(left) == normalize_key(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  NÍVEL   DE SERVIÇO "), "nivel de servico");
        assert_eq!(normalize_key("PREVISÃO\tDE\nENTREGA"), "previsao de entrega");
        assert_eq!(normalize_key("Nº OS"), "nº os");
        assert_eq!(normalize_key("N° OS"), "no os");
        assert_eq!(normalize_key("Coletas"), "coletas");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_every_accent_variant_folds() {
        for (accented, plain) in [
            ("ÁÀÂÃ", "aaaa"),
            ("ÉÊ", "ee"),
            ("Í", "i"),
            ("ÓÔÕ°", "oooo"),
            ("Ú", "u"),
            ("Ç", "c"),
        ] {
            assert_eq!(normalize_key(accented), plain);
        }
    }

    #[test]
    fn test_same_key() {
        assert!(same_key("Entregas", "ENTREGAS"));
        assert!(same_key("DATA  DE COLETA", "data de coleta"));
        assert!(!same_key("DATA COLETA", "DATA DE COLETA"));
    }
}
