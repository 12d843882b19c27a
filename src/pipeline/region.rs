//! Region normalization
//!
//! Turns a raw region reference such as
//! `http://dbpedia.org/resource/Mount_Lebanon_Governorate` into the
//! governorate label `Mount Lebanon`.

/// Qualifier stripped from the end of a region label
pub const GOVERNORATE_SUFFIX: &str = " Governorate";

/// Derive a governorate label from a raw region reference.
///
/// Absent input stays absent. The result only depends on the input, so
/// deriving twice from the same raw value always yields the same label.
pub fn normalize_region(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let segment = raw.rsplit('/').next().unwrap_or(raw);
    let label = segment.replace('_', " ");

    match label.strip_suffix(GOVERNORATE_SUFFIX) {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_with_suffix() {
        assert_eq!(
            normalize_region(Some("http://example.org/Beirut_Governorate")).as_deref(),
            Some("Beirut")
        );
    }

    #[test]
    fn test_multi_word_governorate() {
        assert_eq!(
            normalize_region(Some("http://dbpedia.org/resource/Baalbek-Hermel_Governorate"))
                .as_deref(),
            Some("Baalbek-Hermel")
        );
        assert_eq!(
            normalize_region(Some("http://dbpedia.org/resource/Mount_Lebanon_Governorate"))
                .as_deref(),
            Some("Mount Lebanon")
        );
    }

    #[test]
    fn test_town_without_suffix() {
        assert_eq!(
            normalize_region(Some("http://dbpedia.org/resource/Deir_el_Qamar")).as_deref(),
            Some("Deir el Qamar")
        );
    }

    #[test]
    fn test_no_separator() {
        assert_eq!(normalize_region(Some("Akkar_Governorate")).as_deref(), Some("Akkar"));
    }

    #[test]
    fn test_only_trailing_suffix_is_stripped() {
        assert_eq!(
            normalize_region(Some("x/Governorate_Hall")).as_deref(),
            Some("Governorate Hall")
        );
    }

    #[test]
    fn test_trailing_slash_yields_empty_label() {
        assert_eq!(normalize_region(Some("http://example.org/")).as_deref(), Some(""));
    }

    #[test]
    fn test_absent_passes_through() {
        assert_eq!(normalize_region(None), None);
    }

    #[test]
    fn test_idempotent_derivation() {
        let raw = Some("http://example.org/North_Governorate");
        assert_eq!(normalize_region(raw), normalize_region(raw));

        let once = normalize_region(raw).unwrap();
        assert_eq!(normalize_region(Some(&once)).as_deref(), Some(once.as_str()));
    }
}
