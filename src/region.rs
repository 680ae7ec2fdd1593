// Region names are embedded at the end of URL-shaped identifiers such as
// `http://data.example.org/region#Bint_Jbeil`.
use crate::error::RegionExtractionWarning;
use once_cell::sync::Lazy;
use regex::Regex;

static SEGMENT_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/#]").expect("valid regex"));

/// Extract a display-ready region name from a URL-like identifier.
///
/// Splits on `/` or `#`, keeps the last non-empty segment and turns
/// underscores into spaces. Input without separators is used whole.
pub fn extract_region(raw: &str) -> Result<String, RegionExtractionWarning> {
    SEGMENT_SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .last()
        .map(|seg| seg.replace('_', " "))
        .ok_or_else(|| RegionExtractionWarning { raw: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(extract_region("Akkar").unwrap(), "Akkar");
        let once = extract_region("http://example.org/region#Bint_Jbeil").unwrap();
        assert_eq!(extract_region(&once).unwrap(), once);
    }

    #[test]
    fn takes_fragment_after_hash() {
        assert_eq!(
            extract_region("http://example.org/region#Bint_Jbeil").unwrap(),
            "Bint Jbeil"
        );
    }

    #[test]
    fn takes_last_path_segment() {
        assert_eq!(
            extract_region("http://dbpedia.org/resource/Mount_Lebanon_Governorate").unwrap(),
            "Mount Lebanon Governorate"
        );
        assert_eq!(extract_region("A/Akkar").unwrap(), "Akkar");
    }

    #[test]
    fn trailing_separator_falls_back_to_previous_segment() {
        assert_eq!(extract_region("http://example.org/Zahle/").unwrap(), "Zahle");
    }

    #[test]
    fn underscores_without_separators() {
        assert_eq!(extract_region("Baalbek_Hermel").unwrap(), "Baalbek Hermel");
    }

    #[test]
    fn empty_or_malformed_input_warns() {
        for raw in ["", "   ", "///", "#", "/ #/"] {
            let warning = extract_region(raw).unwrap_err();
            assert_eq!(warning.raw, raw);
        }
    }
}
