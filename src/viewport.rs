//! Viewport ID selection.
//!
//! Used to cross-filter an independently paginated listing by the map's
//! visible rectangle: fetch the candidate records, compute the ids whose
//! coordinates fall inside the box, then restrict the listing to that set.
//!
//! This is a linear scan on every call. For repeated queries over the same
//! candidates build a [`PointIndex`](crate::PointIndex) once instead.

use std::collections::HashSet;

use log::debug;

use crate::bounds::{BoundingBox, in_bounds};
use crate::Locatable;

/// Ids of all records whose coordinate parses and lies inside `bounds`.
///
/// # Example
/// ```
/// use geocluster::{ids_in_bounds, BoundingBox, GeoRecord};
///
/// let records = vec![
///     GeoRecord::new("a", "", Some("-6.2,106.8")),
///     GeoRecord::new("b", "", Some("10,10")),
///     GeoRecord::new("c", "", Some("-")),
/// ];
/// let viewport = BoundingBox { north: -6.0, south: -7.0, east: 107.0, west: 106.0 };
///
/// let ids = ids_in_bounds(&records, &viewport);
/// assert_eq!(ids.len(), 1);
/// assert!(ids.contains("a"));
/// ```
pub fn ids_in_bounds<R: Locatable>(records: &[R], bounds: &BoundingBox) -> HashSet<String> {
    let ids: HashSet<String> = records
        .iter()
        .filter(|r| r.coordinate().is_some_and(|c| in_bounds(&c, bounds)))
        .map(|r| r.id().to_string())
        .collect();

    debug!(
        "[Viewport] {} of {} records inside bounds",
        ids.len(),
        records.len()
    );

    ids
}

/// Parallel version of [`ids_in_bounds`]; returns the same set.
#[cfg(feature = "parallel")]
pub fn ids_in_bounds_parallel<R>(records: &[R], bounds: &BoundingBox) -> HashSet<String>
where
    R: Locatable + Sync,
{
    use rayon::prelude::*;

    let ids: HashSet<String> = records
        .par_iter()
        .filter(|r| r.coordinate().is_some_and(|c| in_bounds(&c, bounds)))
        .map(|r| r.id().to_string())
        .collect();

    debug!(
        "[Viewport] {} of {} records inside bounds (parallel)",
        ids.len(),
        records.len()
    );

    ids
}
