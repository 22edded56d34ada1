//! Viewport bounds.
//!
//! Map clients send the visible rectangle as `{north, south, east, west}`,
//! sometimes as numbers and sometimes as numeric strings. [`BoundsParams`]
//! keeps the raw request shape; [`BoundingBox`] is the validated form used
//! for filtering.
//!
//! Validation only checks that all four edges are present and numeric.
//! An inverted box (`south > north` or `west > east`) is accepted as-is and
//! simply matches nothing along the inverted axis.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{OptionExt, Result};
use crate::Coordinate;

/// Raw bounds as received from a request. Each edge is `None` when it was
/// missing or not numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsParams {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub north: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub south: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub east: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub west: Option<f64>,
}

impl BoundsParams {
    /// Bounds with all four edges set.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north: Some(north),
            south: Some(south),
            east: Some(east),
            west: Some(west),
        }
    }

    /// Convert into a [`BoundingBox`] if every edge is present and finite.
    pub fn validate(&self) -> Option<BoundingBox> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(BoundingBox {
            north: finite(self.north)?,
            south: finite(self.south)?,
            east: finite(self.east)?,
            west: finite(self.west)?,
        })
    }

    /// Parse the compact `"north,south,east,west"` form used on the command line.
    pub fn parse_compact(raw: &str) -> Result<Self> {
        let edges: Vec<f64> = raw
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<_>>>()
            .filter(|v| v.len() == 4)
            .ok_or_invalid_bounds(raw)?;

        Ok(Self::new(edges[0], edges[1], edges[2], edges[3]))
    }
}

/// A validated viewport rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Inclusive containment test, see [`in_bounds`].
    pub fn contains(&self, coord: &Coordinate) -> bool {
        in_bounds(coord, self)
    }

    /// The box as a `geo::Rect` (x = longitude, y = latitude).
    ///
    /// `geo::Rect` normalizes its corners, so an inverted box comes back
    /// un-inverted; use [`BoundingBox::contains`] for filtering.
    pub fn to_rect(&self) -> geo::Rect<f64> {
        geo::Rect::new(
            geo::coord! { x: self.west, y: self.south },
            geo::coord! { x: self.east, y: self.north },
        )
    }
}

impl From<BoundingBox> for BoundsParams {
    fn from(b: BoundingBox) -> Self {
        Self::new(b.north, b.south, b.east, b.west)
    }
}

/// True iff bounds were supplied and all four edges are present and numeric.
///
/// Does not check `south <= north` or `west <= east`.
pub fn is_valid_bounds(bounds: Option<&BoundsParams>) -> bool {
    bounds.and_then(BoundsParams::validate).is_some()
}

/// `south <= lat <= north && west <= lng <= east`.
pub fn in_bounds(coord: &Coordinate, bounds: &BoundingBox) -> bool {
    coord.lat() >= bounds.south
        && coord.lat() <= bounds.north
        && coord.lng() >= bounds.west
        && coord.lng() <= bounds.east
}

/// Accept a JSON number or a numeric string; anything else becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        let b = BoundsParams::parse_compact("-6, -7, 107, 106").unwrap();
        assert_eq!(b, BoundsParams::new(-6.0, -7.0, 107.0, 106.0));

        assert!(BoundsParams::parse_compact("-6,-7,107").is_err());
        assert!(BoundsParams::parse_compact("-6,-7,107,abc").is_err());
        assert!(BoundsParams::parse_compact("").is_err());
    }

    #[test]
    fn test_to_rect() {
        let rect = BoundingBox {
            north: -6.0,
            south: -7.0,
            east: 107.0,
            west: 106.0,
        }
        .to_rect();
        assert_eq!(rect.min().x, 106.0);
        assert_eq!(rect.max().y, -6.0);
    }
}
