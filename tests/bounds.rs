//! Tests for bounds module

use geocluster::{

    BoundingBox, BoundsParams, GeoRecord, ids_in_bounds, in_bounds, is_valid_bounds,

    parse_coordinate,

};

fn jakarta_box() -> BoundingBox {
    BoundingBox {
        north: -6.0,
        south: -7.0,
        east: 107.0,
        west: 106.0,
    }
}

#[test]
fn test_missing_bounds_invalid() {
    assert!(!is_valid_bounds(None));
    assert!(!is_valid_bounds(Some(&BoundsParams::default())));
}

#[test]
fn test_partial_bounds_invalid() {
    let partial = BoundsParams {
        north: Some(-6.0),
        south: Some(-7.0),
        east: Some(107.0),
        west: None,
    };
    assert!(!is_valid_bounds(Some(&partial)));
    assert!(partial.validate().is_none());
}

#[test]
fn test_complete_bounds_valid() {
    let params = BoundsParams::new(-6.0, -7.0, 107.0, 106.0);
    assert!(is_valid_bounds(Some(&params)));
    assert_eq!(params.validate(), Some(jakarta_box()));
}

#[test]
fn test_non_finite_edges_invalid() {
    let params = BoundsParams::new(f64::NAN, -7.0, 107.0, 106.0);
    assert!(!is_valid_bounds(Some(&params)));
    let params = BoundsParams::new(-6.0, f64::NEG_INFINITY, 107.0, 106.0);
    assert!(!is_valid_bounds(Some(&params)));
}

#[test]
fn test_inverted_bounds_still_valid() {
    // Logical consistency is not checked.
    let inverted = BoundsParams::new(-7.0, -6.0, 106.0, 107.0);
    assert!(is_valid_bounds(Some(&inverted)));

    let c = parse_coordinate(Some("-6.5,106.5")).unwrap();
    assert!(!in_bounds(&c, &inverted.validate().unwrap()));
}

#[test]
fn test_deserialize_numbers_and_strings() {
    let params: BoundsParams =
        serde_json::from_str(r#"{"north": "-6", "south": -7, "east": " 107.0 ", "west": 106}"#)
            .unwrap();
    assert_eq!(params, BoundsParams::new(-6.0, -7.0, 107.0, 106.0));
    assert!(is_valid_bounds(Some(&params)));
}

#[test]
fn test_deserialize_non_numeric_edge_invalidates() {
    let params: BoundsParams =
        serde_json::from_str(r#"{"north": "abc", "south": -7, "east": 107, "west": 106}"#)
            .unwrap();
    assert_eq!(params.north, None);
    assert!(!is_valid_bounds(Some(&params)));

    let params: BoundsParams =
        serde_json::from_str(r#"{"north": null, "south": [], "east": {}, "west": true}"#).unwrap();
    assert_eq!(params, BoundsParams::default());
}

#[test]
fn test_deserialize_missing_edges() {
    let params: BoundsParams = serde_json::from_str(r#"{"north": -6}"#).unwrap();
    assert_eq!(params.north, Some(-6.0));
    assert!(!is_valid_bounds(Some(&params)));
}

#[test]
fn test_in_bounds_inclusive_edges() {
    let b = jakarta_box();
    for raw in ["-6,106", "-7,107", "-6,107", "-7,106", "-6.5,106.5"] {
        let c = parse_coordinate(Some(raw)).unwrap();
        assert!(in_bounds(&c, &b), "{raw} should be inside");
        assert!(b.contains(&c));
    }
}

#[test]
fn test_in_bounds_outside() {
    let b = jakarta_box();
    for raw in ["10,10", "-5.999,106.5", "-7.001,106.5", "-6.5,105.999", "-6.5,107.001"] {
        let c = parse_coordinate(Some(raw)).unwrap();
        assert!(!in_bounds(&c, &b), "{raw} should be outside");
    }
}

#[test]
fn test_bounds_filter_idempotent() {
    let records = vec![
        GeoRecord::new("1", "A", Some("-6.2,106.8")),
        GeoRecord::new("2", "B", Some("-6.2001,106.8001")),
        GeoRecord::new("3", "C", Some("10,10")),
        GeoRecord::new("4", "D", Some("-")),
        GeoRecord::new("5", "E", Some("-6.9,106.1")),
    ];
    let b = jakarta_box();

    let once = ids_in_bounds(&records, &b);
    let survivors: Vec<GeoRecord> = records
        .iter()
        .filter(|r| once.contains(&r.id))
        .cloned()
        .collect();
    let twice = ids_in_bounds(&survivors, &b);

    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn test_bounds_roundtrip_from_box() {
    let params = BoundsParams::from(jakarta_box());
    assert_eq!(params.validate(), Some(jakarta_box()));
}
