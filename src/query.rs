//! Request parameter model.
//!
//! Map endpoints receive `{bounds, zoom, search, strategy}` in a query string
//! or JSON body. [`MapQuery`] deserializes that shape and runs the matching
//! operation over the caller's records. Search filtering happens here, on
//! the caller side; the aggregator itself never looks at it.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::bounds::BoundsParams;
use crate::cluster::{AggregationStats, Cluster, ClusterConfig, cluster_with_stats, map_points};
use crate::cluster::{DEFAULT_ZOOM, MapPoint};
use crate::error::Result;
use crate::viewport::ids_in_bounds;
use crate::zoom::ResolutionStrategy;
use crate::GeoRecord;

fn default_zoom() -> i32 {
    DEFAULT_ZOOM
}

/// Object, array or compact `"n,s,e,w"` text; anything else reads as no bounds.
fn lenient_bounds<'de, D>(deserializer: D) -> std::result::Result<Option<BoundsParams>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => BoundsParams::parse_compact(&s).ok(),
        v @ (Value::Object(_) | Value::Array(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Parameters of a map data request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapQuery {
    /// Visible rectangle; missing or malformed means no filtering
    #[serde(default, deserialize_with = "lenient_bounds")]
    pub bounds: Option<BoundsParams>,
    /// Map zoom level
    #[serde(default = "default_zoom")]
    pub zoom: i32,
    /// Free-text filter on id, name, address and string metadata
    #[serde(default)]
    pub search: Option<String>,
    /// `"divide"` or `"multiply"`; missing means divide
    #[serde(default)]
    pub strategy: Option<String>,
}

impl Default for MapQuery {
    fn default() -> Self {
        Self {
            bounds: None,
            zoom: DEFAULT_ZOOM,
            search: None,
            strategy: None,
        }
    }
}

impl MapQuery {
    /// The requested strategy. An unknown selector is an error.
    pub fn strategy(&self) -> Result<ResolutionStrategy> {
        match self.strategy.as_deref() {
            Some(s) => s.parse(),
            None => Ok(ResolutionStrategy::default()),
        }
    }

    /// Records matching `search`, borrowed untouched when there is no term.
    pub fn filter_records<'a>(&self, records: &'a [GeoRecord]) -> Cow<'a, [GeoRecord]> {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => Cow::Owned(
                records
                    .iter()
                    .filter(|r| r.matches_search(term))
                    .cloned()
                    .collect(),
            ),
            _ => Cow::Borrowed(records),
        }
    }

    /// Search, then cluster.
    pub fn clusters(&self, records: &[GeoRecord]) -> Result<(Vec<Cluster>, AggregationStats)> {
        let config = ClusterConfig::new(self.zoom, self.strategy()?);
        let records = self.filter_records(records);
        Ok(cluster_with_stats(
            &*records,
            &config,
            self.bounds.as_ref(),
            GeoRecord::summary,
        ))
    }

    /// Search, then list individual points.
    pub fn points(&self, records: &[GeoRecord]) -> Vec<MapPoint> {
        map_points(&*self.filter_records(records), self.bounds.as_ref())
    }

    /// Search, then select ids inside the bounds.
    ///
    /// Returns `None` when no valid bounds were given, meaning the listing
    /// should not be restricted at all.
    pub fn ids(&self, records: &[GeoRecord]) -> Option<HashSet<String>> {
        let viewport = self.bounds.as_ref()?.validate()?;
        Some(ids_in_bounds(&*self.filter_records(records), &viewport))
    }
}
