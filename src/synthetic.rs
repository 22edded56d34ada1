//! Synthetic dirty-record generator for stress testing and benchmarking.
//!
//! Produces record sets that look like legacy customer tables: most rows
//! carry a usable `"lat,lng"` string scattered around an origin, the rest
//! hold the `"-"` sentinel, blanks, garbage text or out-of-range values.
//! The number of usable rows is known up front, which gives ground truth
//! for count-conservation checks.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use geocluster::synthetic::SyntheticScenario;
//! use geocluster::{cluster, ResolutionStrategy};
//!
//! let dataset = SyntheticScenario {
//!     record_count: 500,
//!     seed: 7,
//!     ..SyntheticScenario::default()
//! }
//! .generate();
//!
//! let clusters = cluster(&dataset.records, 12, None, ResolutionStrategy::Divide);
//! let total: usize = clusters.iter().map(|c| c.count).sum();
//! assert_eq!(total, dataset.expected_valid);
//! ```

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::{Coordinate, GeoRecord};

// ============================================================================
// Types
// ============================================================================

/// Scenario configuration for generating synthetic records.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Center of the generated points (defaults to Jakarta).
    pub origin: Coordinate,
    /// Number of records to generate.
    pub record_count: usize,
    /// Standard deviation of the scatter around `origin`, in meters.
    pub spread_meters: f64,
    /// Fraction of records with garbage or out-of-range coordinates (0.0-1.0).
    pub invalid_fraction: f64,
    /// Fraction of records with no location (`"-"`, blank or missing).
    pub sentinel_fraction: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for SyntheticScenario {
    fn default() -> Self {
        Self {
            origin: Coordinate {
                lat: -6.2,
                lng: 106.816666,
            },
            record_count: 1_000,
            spread_meters: 15_000.0,
            invalid_fraction: 0.1,
            sentinel_fraction: 0.2,
            seed: 42,
        }
    }
}

/// A generated record set with ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// Generated records, ids `cust_00000`, `cust_00001`, ...
    pub records: Vec<GeoRecord>,
    /// Records whose coordinate is expected to parse.
    pub expected_valid: usize,
}

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Convert meters to degrees of longitude at a given latitude.
fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

/// Box-Muller pair of standard normal samples.
fn gaussian_pair(rng: &mut StdRng) -> (f64, f64) {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.r#gen();
    let r = (-2.0 * u1.ln()).sqrt();
    (r * (2.0 * PI * u2).cos(), r * (2.0 * PI * u2).sin())
}

const SENTINELS: [Option<&str>; 4] = [Some("-"), Some(""), Some("   "), None];

const GARBAGE: [&str; 8] = [
    "abc,def",
    "1,2,3",
    "-6.2",
    "-6.2;106.8",
    "lat -6.2 lng 106.8",
    "1e1,2e1",
    "-6.2.1,106.8",
    "+6.2,106.8",
];

const STATUSES: [&str; 3] = ["active", "suspended", "cancelled"];

// ============================================================================
// Scenario Implementation
// ============================================================================

impl SyntheticScenario {
    /// Generate a complete synthetic dataset from this scenario.
    pub fn generate(&self) -> SyntheticDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.record_count);
        let mut expected_valid = 0;

        for idx in 0..self.record_count {
            let roll: f64 = rng.r#gen();
            let coordinate = if roll < self.sentinel_fraction {
                SENTINELS[rng.gen_range(0..SENTINELS.len())].map(str::to_string)
            } else if roll < self.sentinel_fraction + self.invalid_fraction {
                Some(self.invalid_coordinate(&mut rng))
            } else {
                expected_valid += 1;
                Some(self.valid_coordinate(&mut rng))
            };

            let status = STATUSES[rng.gen_range(0..STATUSES.len())];
            records.push(GeoRecord {
                id: format!("cust_{:05}", idx),
                name: format!("Customer {}", idx),
                address: Some(format!("Jl. Synthetic No. {}", idx % 200 + 1)),
                coordinate,
                metadata: [("status".to_string(), Value::from(status))]
                    .into_iter()
                    .collect(),
            });
        }

        SyntheticDataset {
            records,
            expected_valid,
        }
    }

    fn valid_coordinate(&self, rng: &mut StdRng) -> String {
        let (z0, z1) = gaussian_pair(rng);
        let lat = (self.origin.lat() + z0 * self.spread_meters / METERS_PER_DEG_LAT)
            .clamp(-89.999, 89.999);
        let lng = (self.origin.lng() + meters_to_deg_lng(z1 * self.spread_meters, lat))
            .clamp(-179.999, 179.999);

        // Legacy rows mix tight and padded separators.
        if rng.gen_bool(0.5) {
            format!("{:.6},{:.6}", lat, lng)
        } else {
            format!(" {:.6}, {:.6} ", lat, lng)
        }
    }

    fn invalid_coordinate(&self, rng: &mut StdRng) -> String {
        if rng.gen_bool(0.5) {
            GARBAGE[rng.gen_range(0..GARBAGE.len())].to_string()
        } else {
            let lat: f64 = rng.gen_range(90.5..180.0);
            let lng: f64 = rng.gen_range(-180.0..180.0);
            if rng.gen_bool(0.5) {
                format!("{:.4},{:.4}", lat, lng)
            } else {
                // Swapped order: lng in the lat slot puts lat out of range.
                format!("{:.4},{:.4}", lng.abs() + 90.5, lat - 90.5)
            }
        }
    }
}
