//! Grid clustering of located records.
//!
//! Every record is parsed, optionally filtered by a viewport, and snapped to
//! a zoom-dependent grid cell. Records landing in the same cell collapse into
//! one [`Cluster`] whose position is the cell coordinate itself (not the
//! mean of its members). Each cluster keeps a running count and at most
//! [`MAX_CLUSTER_ITEMS`] member summaries.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundsParams, in_bounds};
use crate::zoom::{ResolutionStrategy, cell_key, normalize, resolution_for_zoom};
use crate::{GeoRecord, Locatable, RecordSummary};

/// Hard cap on member summaries kept per cluster.
pub const MAX_CLUSTER_ITEMS: usize = 5;

/// Zoom used when a request does not specify one.
pub const DEFAULT_ZOOM: i32 = 10;

/// Configuration for a clustering pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Map zoom level; higher means smaller cells.
    /// Default: 10
    pub zoom: i32,

    /// Grid snapping strategy.
    /// Default: divide
    pub strategy: ResolutionStrategy,

    /// Member summaries kept per cluster, clamped to [`MAX_CLUSTER_ITEMS`].
    /// Default: 5
    pub max_items: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            strategy: ResolutionStrategy::Divide,
            max_items: MAX_CLUSTER_ITEMS,
        }
    }
}

impl ClusterConfig {
    pub fn new(zoom: i32, strategy: ResolutionStrategy) -> Self {
        Self {
            zoom,
            strategy,
            ..Self::default()
        }
    }

    fn item_cap(&self) -> usize {
        self.max_items.min(MAX_CLUSTER_ITEMS)
    }
}

/// A map marker standing for every record in one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster<S = RecordSummary> {
    /// `"<lat>,<lng>"` of the cell, fixed six-decimal formatting
    pub id: String,
    /// Cell latitude
    pub lat: f64,
    /// Cell longitude
    pub lng: f64,
    /// Number of records in the cell
    pub count: usize,
    /// First members seen, at most [`MAX_CLUSTER_ITEMS`]
    pub items: Vec<S>,
}

/// Where the input records went during one clustering pass.
///
/// `unparseable + out_of_bounds + clustered == total` always holds, and
/// `clustered` equals the sum of all cluster counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Records examined
    pub total: usize,
    /// Records with a missing, sentinel, malformed or out-of-range coordinate
    pub unparseable: usize,
    /// Records with a valid coordinate outside the viewport
    pub out_of_bounds: usize,
    /// Records assigned to a cluster
    pub clustered: usize,
    /// Distinct clusters produced
    pub clusters: usize,
}

/// Cluster [`GeoRecord`]s with the default member summary.
///
/// `bounds` is applied only when it is valid (see
/// [`is_valid_bounds`](crate::is_valid_bounds)); otherwise every record with
/// a parseable coordinate is kept.
///
/// # Example
/// ```
/// use geocluster::{cluster, BoundsParams, GeoRecord, ResolutionStrategy};
///
/// let records = vec![
///     GeoRecord::new("1", "A", Some("-6.2,106.8")),
///     GeoRecord::new("2", "B", Some("10,10")),
/// ];
/// let viewport = BoundsParams::new(-6.0, -7.0, 107.0, 106.0);
///
/// let clusters = cluster(&records, 10, Some(&viewport), ResolutionStrategy::Divide);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].id, "-6.200000,106.800000");
/// ```
pub fn cluster(
    records: &[GeoRecord],
    zoom: i32,
    bounds: Option<&BoundsParams>,
    strategy: ResolutionStrategy,
) -> Vec<Cluster> {
    cluster_by(
        records,
        &ClusterConfig::new(zoom, strategy),
        bounds,
        GeoRecord::summary,
    )
}

/// Cluster any [`Locatable`] records, building member summaries with `summarize`.
///
/// `summarize` is only called for records that make it into a cluster's
/// `items` list.
pub fn cluster_by<R, S, F>(
    records: &[R],
    config: &ClusterConfig,
    bounds: Option<&BoundsParams>,
    summarize: F,
) -> Vec<Cluster<S>>
where
    R: Locatable,
    F: FnMut(&R) -> S,
{
    cluster_with_stats(records, config, bounds, summarize).0
}

/// Like [`cluster_by`], also reporting how many records were dropped and why.
pub fn cluster_with_stats<R, S, F>(
    records: &[R],
    config: &ClusterConfig,
    bounds: Option<&BoundsParams>,
    mut summarize: F,
) -> (Vec<Cluster<S>>, AggregationStats)
where
    R: Locatable,
    F: FnMut(&R) -> S,
{
    let viewport = bounds.and_then(BoundsParams::validate);
    let resolution = resolution_for_zoom(config.zoom, config.strategy);
    let cap = config.item_cap();

    let mut stats = AggregationStats {
        total: records.len(),
        ..Default::default()
    };
    let mut clusters: Vec<Cluster<S>> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(coord) = record.coordinate() else {
            stats.unparseable += 1;
            continue;
        };

        if let Some(ref viewport) = viewport {
            if !in_bounds(&coord, viewport) {
                stats.out_of_bounds += 1;
                continue;
            }
        }

        stats.clustered += 1;

        let lat = resolution.snap(coord.lat());
        let lng = resolution.snap(coord.lng());
        let key = cell_key(lat, lng);

        match by_key.get(&key) {
            Some(&idx) => {
                let existing = &mut clusters[idx];
                existing.count += 1;
                if existing.items.len() < cap {
                    existing.items.push(summarize(record));
                }
            }
            None => {
                let items = if cap > 0 {
                    vec![summarize(record)]
                } else {
                    Vec::new()
                };
                by_key.insert(key.clone(), clusters.len());
                clusters.push(Cluster {
                    id: key,
                    lat: normalize(lat),
                    lng: normalize(lng),
                    count: 1,
                    items,
                });
            }
        }
    }

    stats.clusters = clusters.len();

    debug!(
        "[Cluster] zoom={} strategy={} resolution={}: {} of {} records in {} clusters ({} unparseable, {} out of bounds)",
        config.zoom,
        config.strategy,
        resolution.value(),
        stats.clustered,
        stats.total,
        stats.clusters,
        stats.unparseable,
        stats.out_of_bounds
    );

    (clusters, stats)
}

/// Sort clusters by key for deterministic output.
pub fn sort_clusters<S>(clusters: &mut [Cluster<S>]) {
    clusters.sort_by(|a, b| a.id.cmp(&b.id));
}

/// An unclustered map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Every record with a parseable coordinate inside `bounds` (or anywhere,
/// when `bounds` is missing or invalid), as individual map points.
pub fn map_points(records: &[GeoRecord], bounds: Option<&BoundsParams>) -> Vec<MapPoint> {
    let viewport = bounds.and_then(BoundsParams::validate);

    let points: Vec<MapPoint> = records
        .iter()
        .filter_map(|record| {
            let coord = record.coordinate()?;
            if let Some(ref viewport) = viewport {
                if !in_bounds(&coord, viewport) {
                    return None;
                }
            }
            Some(MapPoint {
                id: record.id.clone(),
                lat: coord.lat(),
                lng: coord.lng(),
                name: record.name.clone(),
                address: record.address.clone(),
            })
        })
        .collect();

    debug!(
        "[Cluster] map_points: {} of {} records located",
        points.len(),
        records.len()
    );

    points
}
