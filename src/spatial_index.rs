//! Spatial indexing for viewport queries.
//!
//! Uses an R-tree over parsed record coordinates so that repeated viewport
//! selections over the same candidate set do not rescan and reparse every
//! record. Answers are identical to [`ids_in_bounds`](crate::ids_in_bounds).

use std::collections::HashSet;

use log::info;
use rstar::{AABB, RTree, RTreeObject};

use crate::bounds::BoundingBox;
use crate::{Coordinate, Locatable};

/// A located record id stored in the R-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub id: String,
    pub coordinate: Coordinate,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.coordinate.lng(), self.coordinate.lat()])
    }
}

/// R-tree of record coordinates keyed by record id.
///
/// Records whose coordinate does not parse are counted in
/// [`PointIndex::skipped`] and never returned.
#[derive(Debug)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    skipped: usize,
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PointIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            skipped: 0,
        }
    }

    /// Bulk-load an index from records.
    pub fn from_records<R: Locatable>(records: &[R]) -> Self {
        let points: Vec<IndexedPoint> = records
            .iter()
            .filter_map(|r| {
                r.coordinate().map(|coordinate| IndexedPoint {
                    id: r.id().to_string(),
                    coordinate,
                })
            })
            .collect();

        let skipped = records.len() - points.len();
        info!(
            "[PointIndex] Indexed {} records ({} without a usable coordinate)",
            points.len(),
            skipped
        );

        Self {
            tree: RTree::bulk_load(points),
            skipped,
        }
    }

    /// Insert a single record. Returns `false` if its coordinate does not parse.
    pub fn insert<R: Locatable>(&mut self, record: &R) -> bool {
        match record.coordinate() {
            Some(coordinate) => {
                self.tree.insert(IndexedPoint {
                    id: record.id().to_string(),
                    coordinate,
                });
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.skipped = 0;
    }

    /// Ids inside the viewport, edges inclusive.
    ///
    /// An inverted box matches nothing, same as the linear filter.
    pub fn query_viewport(&self, bounds: &BoundingBox) -> Vec<String> {
        if bounds.south > bounds.north || bounds.west > bounds.east {
            return Vec::new();
        }

        let envelope = AABB::from_corners([bounds.west, bounds.south], [bounds.east, bounds.north]);

        self.tree
            .locate_in_envelope(&envelope)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Set form of [`PointIndex::query_viewport`].
    pub fn ids_in_bounds(&self, bounds: &BoundingBox) -> HashSet<String> {
        self.query_viewport(bounds).into_iter().collect()
    }

    /// Ids within a square of `radius_degrees` around a point.
    pub fn find_nearby(&self, center: &Coordinate, radius_degrees: f64) -> Vec<String> {
        self.query_viewport(&BoundingBox {
            north: center.lat() + radius_degrees,
            south: center.lat() - radius_degrees,
            east: center.lng() + radius_degrees,
            west: center.lng() - radius_degrees,
        })
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Records rejected because their coordinate did not parse.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
