//! Postcode area identifiers.
//!
//! A UK postcode such as `AB12 3CD` starts with a one- or two-letter area
//! code (`AB`). Coverage data is keyed by that area code, so every region
//! string coming from the CSV is reduced to its leading uppercase run.

use std::fmt;

/// A non-empty run of ASCII uppercase letters identifying a postcode area.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AreaCode(String);

impl AreaCode {
    /// Extracts the leading uppercase-letter run of `region`.
    ///
    /// Returns `None` when the region does not start with an uppercase ASCII
    /// letter (including the empty string). Leading whitespace is not
    /// trimmed: ` AB1` has no area prefix.
    pub fn from_region(region: &str) -> Option<Self> {
        let end = region
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .unwrap_or(region.len());
        if end == 0 {
            return None;
        }
        Some(Self(region[..end].to_string()))
    }

    /// Builds an area code from a GeoJSON `name` property. The whole string
    /// must be uppercase letters.
    pub fn parse(name: &str) -> Option<Self> {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(Self(name.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AreaCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_postcode_yields_area() {
        let code = AreaCode::from_region("AB12 3CD").unwrap();
        assert_eq!(code.as_str(), "AB");
    }

    #[test]
    fn test_single_letter_area() {
        assert_eq!(AreaCode::from_region("B1 1AA").unwrap().as_str(), "B");
        assert_eq!(AreaCode::from_region("E").unwrap().as_str(), "E");
    }

    #[test]
    fn test_no_prefix_is_none() {
        assert!(AreaCode::from_region("").is_none());
        assert!(AreaCode::from_region("12AB").is_none());
        assert!(AreaCode::from_region("ab12").is_none());
        assert!(AreaCode::from_region(" AB12").is_none());
    }

    #[test]
    fn test_prefix_stops_at_lowercase() {
        assert_eq!(AreaCode::from_region("SWindon").unwrap().as_str(), "SW");
    }

    #[test]
    fn test_parse_requires_all_uppercase() {
        assert_eq!(AreaCode::parse("EH").unwrap().as_str(), "EH");
        assert!(AreaCode::parse("EH1").is_none());
        assert!(AreaCode::parse("").is_none());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut codes = vec![
            AreaCode::parse("WC").unwrap(),
            AreaCode::parse("AB").unwrap(),
            AreaCode::parse("B").unwrap(),
        ];
        codes.sort();
        let names: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["AB", "B", "WC"]);
    }
}
