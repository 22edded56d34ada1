//! Tests for coords module

use geocluster::coords::{NO_LOCATION_SENTINEL, is_decimal};
use geocluster::{Coordinate, parse_coordinate};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[test]
fn test_parse_valid_coordinate() {
    let c = parse_coordinate(Some("-6.200000,106.816666")).unwrap();
    assert_eq!(c.lat(), -6.2);
    assert_eq!(c.lng(), 106.816666);
    assert_eq!(Some(c), Coordinate::new(-6.2, 106.816666));
}

#[test]
fn test_parse_trims_whitespace() {
    let c = parse_coordinate(Some("  -6.2 ,  106.8  ")).unwrap();
    assert_eq!(c.lat(), -6.2);
    assert_eq!(c.lng(), 106.8);
}

#[test]
fn test_parse_integers() {
    let c = parse_coordinate(Some("10,10")).unwrap();
    assert_eq!(c.lat(), 10.0);
    assert_eq!(c.lng(), 10.0);
}

#[test]
fn test_sentinels_are_no_location() {
    assert_eq!(NO_LOCATION_SENTINEL, "-");
    assert!(parse_coordinate(Some("-")).is_none());
    assert!(parse_coordinate(Some(" - ")).is_none());
    assert!(parse_coordinate(Some("")).is_none());
    assert!(parse_coordinate(Some("   ")).is_none());
    assert!(parse_coordinate(None).is_none());
}

#[test]
fn test_range_rejection() {
    assert!(parse_coordinate(Some("91,0")).is_none());
    assert!(parse_coordinate(Some("0,181")).is_none());
    assert!(parse_coordinate(Some("-91,-181")).is_none());
    assert!(parse_coordinate(Some("-90.0001,0")).is_none());
}

#[test]
fn test_range_edges_accepted() {
    assert!(parse_coordinate(Some("90,180")).is_some());
    assert!(parse_coordinate(Some("-90,-180")).is_some());
    assert!(parse_coordinate(Some("0,0")).is_some());
}

#[test]
fn test_malformed_rejection() {
    assert!(parse_coordinate(Some("abc,def")).is_none());
    assert!(parse_coordinate(Some("1,2,3")).is_none());
    assert!(parse_coordinate(Some("1")).is_none());
    assert!(parse_coordinate(Some("1,")).is_none());
    assert!(parse_coordinate(Some(",1")).is_none());
    assert!(parse_coordinate(Some("-6.2;106.8")).is_none());
    assert!(parse_coordinate(Some("1e1,2")).is_none());
    assert!(parse_coordinate(Some("+1,2")).is_none());
    assert!(parse_coordinate(Some("1.2.3,4")).is_none());
    assert!(parse_coordinate(Some("NaN,0")).is_none());
    assert!(parse_coordinate(Some("inf,0")).is_none());
    assert!(parse_coordinate(Some("- 6.2,106.8")).is_none());
}

#[test]
fn test_parse_edge_inputs() {
    // Nothing here may panic; whatever parses must satisfy the range invariant.
    let inputs = [
        "", ",", ",,", "-,-", "--1,2", "0.,.0", ".,.", "1 2,3", "٣,٤", "\u{0}", "9999999999999999999999,0",
        "-0,-0", "89.9999999999,179.9999999999", "-", "🙂,🙂", "1,2 ", "\t1\t,\t2\t",
    ];

    for input in inputs {
        if let Some(c) = parse_coordinate(Some(input)) {
            assert!((-90.0..=90.0).contains(&c.lat()), "{input}");
            assert!((-180.0..=180.0).contains(&c.lng()), "{input}");
        }
    }
}

#[test]
fn test_leading_and_trailing_dot() {
    let c = parse_coordinate(Some("0.,.5")).unwrap();
    assert_eq!(c.lat(), 0.0);
    assert_eq!(c.lng(), 0.5);
}

#[test]
fn test_is_decimal_public() {
    assert!(is_decimal("-106.816666"));
    assert!(!is_decimal("106,8"));
}

proptest! {
    #![proptest_config(Config::with_cases(512))]

    #[test]
    fn parse_is_total_over_arbitrary_text(raw in any::<String>()) {
        if let Some(c) = parse_coordinate(Some(&raw)) {
            prop_assert!((-90.0..=90.0).contains(&c.lat()));
            prop_assert!((-180.0..=180.0).contains(&c.lng()));
        }
    }

    #[test]
    fn parse_is_total_over_numeric_looking_text(
        raw in "[ \\t]?-?[0-9]{0,4}\\.?[0-9]{0,4}[ ,;]{0,2}-?[0-9]{0,4}\\.?[0-9]{0,4}(,[0-9]{1,2})?"
    ) {
        if let Some(c) = parse_coordinate(Some(&raw)) {
            prop_assert!((-90.0..=90.0).contains(&c.lat()));
            prop_assert!((-180.0..=180.0).contains(&c.lng()));
        }
    }

    #[test]
    fn in_range_pairs_always_parse(
        lat in "-?[0-8]?[0-9](\\.[0-9]{1,6})?",
        lng in "-?1?[0-7]?[0-9](\\.[0-9]{1,6})?",
        pad in "[ \\t]{0,2}",
    ) {
        let raw = format!("{pad}{lat}{pad},{pad}{lng}{pad}");
        let c = parse_coordinate(Some(&raw));
        prop_assert!(c.is_some(), "{raw:?}");
        let c = c.unwrap();
        prop_assert_eq!(c.lat(), lat.parse::<f64>().unwrap());
        prop_assert_eq!(c.lng(), lng.parse::<f64>().unwrap());
    }

    #[test]
    fn extra_segments_never_parse(
        lat in -90.0f64..=90.0,
        lng in -180.0f64..=180.0,
        tail in "[0-9]{1,3}",
    ) {
        let raw = format!("{lat},{lng},{tail}");
        prop_assert!(parse_coordinate(Some(&raw)).is_none());
    }
}
