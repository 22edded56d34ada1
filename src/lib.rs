//! # geocluster
//!
//! Turn records carrying free-text `"lat,lng"` strings into map-ready data.
//!
//! This library provides:
//! - Tolerant coordinate parsing for dirty legacy data (`"-"`, blanks, garbage)
//! - Viewport (bounding box) validation and filtering
//! - Zoom-dependent grid clustering with capped member samples
//! - Viewport ID selection for cross-filtering paginated listings
//! - An R-tree point index for repeated viewport queries
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel viewport filtering with rayon
//! - **`synthetic`** - Seeded dirty-record generator for benches and stress tests
//! - **`cli`** - Build the `geocluster-cli` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use geocluster::{cluster, GeoRecord, ResolutionStrategy};
//!
//! let records = vec![
//!     GeoRecord::new("1", "Kantor Pusat", Some("-6.2,106.8")),
//!     GeoRecord::new("2", "Gudang", Some("-6.2001,106.8001")),
//!     GeoRecord::new("3", "Cabang", Some("-")),
//! ];
//!
//! let clusters = cluster(&records, 10, None, ResolutionStrategy::Divide);
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].count, 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Unified error handling
pub mod error;
pub use error::{AggregateError, OptionExt, Result};

// Coordinate string parsing
pub mod coords;
pub use coords::parse_coordinate;

// Bounding box validation and point-in-box filtering
pub mod bounds;
pub use bounds::{BoundingBox, BoundsParams, in_bounds, is_valid_bounds};

// Zoom level to grid resolution mapping
pub mod zoom;
pub use zoom::{Resolution, ResolutionStrategy, resolution_for_zoom};

// Grid clustering
pub mod cluster;
pub use cluster::{
    AggregationStats, Cluster, ClusterConfig, MAX_CLUSTER_ITEMS, MapPoint, cluster, cluster_by,
    cluster_with_stats, map_points, sort_clusters,
};

// Viewport ID selection
pub mod viewport;
#[cfg(feature = "parallel")]
pub use viewport::ids_in_bounds_parallel;
pub use viewport::ids_in_bounds;

// R-tree point index
pub mod spatial_index;
pub use spatial_index::{IndexedPoint, PointIndex};

// Request parameter model
pub mod query;
pub use query::MapQuery;

// Synthetic dirty data for benches and stress tests
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A validated geographic coordinate.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`.
/// Instances only come out of [`parse_coordinate`] or [`Coordinate::new`],
/// both of which enforce the range.
///
/// # Example
/// ```
/// use geocluster::Coordinate;
/// assert!(Coordinate::new(-6.2, 106.816666).is_some());
/// assert!(Coordinate::new(91.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.lng, y: c.lat }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Anything that carries an identifier and a raw coordinate string.
///
/// Implement this for your own row types to cluster them without
/// converting into [`GeoRecord`] first.
pub trait Locatable {
    /// Opaque identifier of the record.
    fn id(&self) -> &str;

    /// The raw `"lat,lng"` string, if any.
    fn raw_coordinate(&self) -> Option<&str>;

    /// Parse the raw coordinate string.
    fn coordinate(&self) -> Option<Coordinate> {
        parse_coordinate(self.raw_coordinate())
    }
}

/// A caller-supplied record with a free-text coordinate field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// Opaque identifier (numeric ids are accepted and kept as text)
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Display name; `null` or non-text values read as empty
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    /// Display address
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    /// Raw `"lat,lng"` string; `"-"` or empty means no location
    #[serde(
        default,
        alias = "coordinates",
        alias = "latlng",
        deserialize_with = "lenient_coordinate"
    )]
    pub coordinate: Option<String>,
    /// Arbitrary extra display fields, carried into member summaries
    #[serde(
        default,
        deserialize_with = "lenient_metadata",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub metadata: BTreeMap<String, Value>,
}

impl GeoRecord {
    /// Create a record without address or metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            coordinate: coordinate.map(str::to_string),
            metadata: BTreeMap::new(),
        }
    }

    /// Set the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Add a metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The summary placed into a cluster's `items` list.
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            extra: self.metadata.clone(),
        }
    }

    /// Case-insensitive substring match on id, name, address and string metadata.
    ///
    /// An empty or whitespace-only term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&needle);

        hit(self.id.as_str())
            || hit(self.name.as_str())
            || self.address.as_deref().is_some_and(hit)
            || self
                .metadata
                .values()
                .any(|v| v.as_str().is_some_and(hit))
    }
}

impl Locatable for GeoRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw_coordinate(&self) -> Option<&str> {
        self.coordinate.as_deref()
    }
}

/// Default member summary of a cluster: id, name, address, plus metadata
/// flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

// Display fields accept any JSON type; unusable values read as empty.

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Numbers are kept as text so they reach the parser (and fail there).
fn lenient_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_metadata<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}
