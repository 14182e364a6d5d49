//! Occupancy Fixtures

use serde::Deserialize;

use crate::occupancy::RawOccupancy;

/// A named occupancy scenario
#[derive(Debug, Clone, Deserialize)]
pub struct OccupancyFixture {
    /// Optional scenario name
    #[serde(default)]
    pub name: Option<String>,

    /// Raw occupancy values, coerced leniently when quoted
    #[serde(default)]
    pub occupancy: RawOccupancy,
}
