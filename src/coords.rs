//! Coordinate string parsing.
//!
//! Source data stores locations as free text of the form `"<lat>,<lng>"`.
//! Legacy rows contain `"-"`, blanks, swapped separators and other junk, so
//! parsing is total: anything that is not a clean, in-range decimal pair
//! comes back as `None`.

use crate::Coordinate;

/// Marker used in source data for "no location recorded".
pub const NO_LOCATION_SENTINEL: &str = "-";

/// Parse a raw `"lat,lng"` string into a validated [`Coordinate`].
///
/// Returns `None` for missing input, the empty string, the `"-"` sentinel,
/// anything that does not split into exactly two decimal numbers, and
/// values outside `[-90, 90]` / `[-180, 180]`.
///
/// # Example
/// ```
/// use geocluster::parse_coordinate;
///
/// let c = parse_coordinate(Some(" -6.200000, 106.816666 ")).unwrap();
/// assert_eq!(c.lat(), -6.2);
/// assert!(parse_coordinate(Some("-")).is_none());
/// assert!(parse_coordinate(Some("1,2,3")).is_none());
/// ```
pub fn parse_coordinate(raw: Option<&str>) -> Option<Coordinate> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == NO_LOCATION_SENTINEL {
        return None;
    }

    let mut parts = raw.split(',');
    let (lat, lng) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lng), None) => (lat.trim(), lng.trim()),
        _ => return None,
    };

    if !is_decimal(lat) || !is_decimal(lng) {
        return None;
    }

    Coordinate::new(lat.parse().ok()?, lng.parse().ok()?)
}

/// Plain decimal syntax: optional leading `-`, ASCII digits, at most one `.`,
/// and at least one digit. No exponent, no `+`, no inner whitespace.
pub fn is_decimal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut digits = 0usize;
    let mut dots = 0usize;

    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }

    digits > 0 && dots <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_decimal() {
        assert!(is_decimal("0"));
        assert!(is_decimal("-6.2"));
        assert!(is_decimal(".5"));
        assert!(is_decimal("5."));
        assert!(!is_decimal(""));
        assert!(!is_decimal("-"));
        assert!(!is_decimal("."));
        assert!(!is_decimal("1.2.3"));
        assert!(!is_decimal("+1"));
        assert!(!is_decimal("1e5"));
        assert!(!is_decimal("--1"));
        assert!(!is_decimal("1 2"));
        assert!(!is_decimal("NaN"));
    }
}
