//! Zoom level to grid resolution.
//!
//! Two equivalent ways of snapping a coordinate to a grid are in use:
//!
//! - **divide**: `round(v / cell) * cell`, where `cell` is a cell size in degrees
//! - **multiply**: `round(v * precision) / precision`, where `precision` is an
//!   inverse cell size
//!
//! Each has its own zoom table. Tables are evaluated top-down; the first row
//! whose threshold is `<= zoom` wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AggregateError;

/// Decimal places used for cluster keys and snapped centroids.
pub const KEY_DECIMALS: usize = 6;

/// `(min zoom, cell size in degrees)` for the divide strategy.
pub const DIVIDE_TABLE: [(i32, f64); 5] = [
    (15, 0.001),
    (13, 0.005),
    (11, 0.01),
    (9, 0.02),
    (7, 0.05),
];

/// Cell size below the lowest divide threshold.
pub const DIVIDE_FALLBACK: f64 = 0.1;

/// `(min zoom, precision)` for the multiply strategy.
pub const MULTIPLY_TABLE: [(i32, f64); 5] = [
    (16, 10000.0),
    (14, 1000.0),
    (12, 100.0),
    (10, 10.0),
    (8, 1.0),
];

/// Precision below the lowest multiply threshold.
pub const MULTIPLY_FALLBACK: f64 = 0.1;

/// How a zoom level is turned into a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStrategy {
    /// Snap by dividing by a cell size in degrees.
    #[default]
    Divide,
    /// Snap by multiplying by a precision factor.
    Multiply,
}

impl FromStr for ResolutionStrategy {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "divide" => Ok(Self::Divide),
            "multiply" => Ok(Self::Multiply),
            _ => Err(AggregateError::UnsupportedStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Divide => write!(f, "divide"),
            Self::Multiply => write!(f, "multiply"),
        }
    }
}

/// Grid resolution for a given zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Cell size in degrees (divide strategy).
    CellSize(f64),
    /// Inverse cell size (multiply strategy).
    Precision(f64),
}

impl Resolution {
    /// The raw table value.
    pub fn value(&self) -> f64 {
        match *self {
            Self::CellSize(v) | Self::Precision(v) => v,
        }
    }

    /// Snap a single degree value onto the grid.
    pub fn snap(&self, v: f64) -> f64 {
        match *self {
            Self::CellSize(cell) => (v / cell).round() * cell,
            Self::Precision(p) => (v * p).round() / p,
        }
    }
}

/// Look up the grid resolution for `zoom` under `strategy`.
///
/// # Example
/// ```
/// use geocluster::{resolution_for_zoom, Resolution, ResolutionStrategy};
///
/// assert_eq!(
///     resolution_for_zoom(10, ResolutionStrategy::Divide),
///     Resolution::CellSize(0.02)
/// );
/// assert_eq!(
///     resolution_for_zoom(10, ResolutionStrategy::Multiply),
///     Resolution::Precision(10.0)
/// );
/// ```
pub fn resolution_for_zoom(zoom: i32, strategy: ResolutionStrategy) -> Resolution {
    match strategy {
        ResolutionStrategy::Divide => {
            Resolution::CellSize(lookup(&DIVIDE_TABLE, zoom, DIVIDE_FALLBACK))
        }
        ResolutionStrategy::Multiply => {
            Resolution::Precision(lookup(&MULTIPLY_TABLE, zoom, MULTIPLY_FALLBACK))
        }
    }
}

fn lookup(table: &[(i32, f64)], zoom: i32, fallback: f64) -> f64 {
    table
        .iter()
        .find(|(threshold, _)| zoom >= *threshold)
        .map_or(fallback, |&(_, value)| value)
}

/// Round to [`KEY_DECIMALS`] places and fold `-0.0` into `0.0`.
///
/// Snapping leaves float noise such as `-6.200000000000001`; two points in
/// the same cell must end up with identical keys and centroids.
pub fn normalize(v: f64) -> f64 {
    let scale = 10f64.powi(KEY_DECIMALS as i32);
    let rounded = (v * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fixed-precision, locale-independent key for a snapped cell.
pub fn cell_key(lat: f64, lng: f64) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        normalize(lat),
        normalize(lng),
        prec = KEY_DECIMALS
    )
}
