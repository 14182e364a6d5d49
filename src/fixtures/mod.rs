//! Fixtures
//!
//! Price tables and occupancy scenarios stored as YAML under a base directory:
//!
//! ```text
//! fixtures/
//!   prices/<name>.yml
//!   occupancy/<name>.yml
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    catalog::UnknownPriceKey,
    fixtures::{occupancy::OccupancyFixture, prices::PricesFixture},
    prices::{PriceTableError, UnitPriceTable},
};

pub mod occupancy;
pub mod prices;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Price keyed by a name outside the catalog
    #[error(transparent)]
    UnknownPriceKey(#[from] UnknownPriceKey),

    /// Price rejected by the table
    #[error(transparent)]
    PriceTable(#[from] PriceTableError),

    /// Price fixture without any entries
    #[error("No prices defined; currency unknown")]
    NoPrices,
}

/// Loads fixtures from a base directory.
#[derive(Debug, Clone)]
pub struct Fixtures {
    base_path: PathBuf,
}

impl Fixtures {
    /// Fixtures under `./fixtures`
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Fixtures under a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Base directory fixtures are read from
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load the price table `prices/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price or key
    /// is invalid, or if prices use different currencies.
    pub fn load_prices(&self, name: &str) -> Result<UnitPriceTable, FixtureError> {
        let contents = self.read("prices", name)?;

        prices_from_str(&contents)
    }

    /// Load the occupancy scenario `occupancy/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_occupancy(&self, name: &str) -> Result<OccupancyFixture, FixtureError> {
        let contents = self.read("occupancy", name)?;

        occupancy_from_str(&contents)
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let path = self.base_path.join(kind).join(format!("{name}.yml"));

        fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a price table from YAML.
///
/// # Errors
///
/// See [`Fixtures::load_prices`].
pub fn prices_from_str(yaml: &str) -> Result<UnitPriceTable, FixtureError> {
    let fixture: PricesFixture = serde_norway::from_str(yaml)?;

    fixture.try_into()
}

/// Parse an occupancy scenario from YAML.
///
/// # Errors
///
/// Returns an error if the YAML cannot be parsed.
pub fn occupancy_from_str(yaml: &str) -> Result<OccupancyFixture, FixtureError> {
    Ok(serde_norway::from_str(yaml)?)
}
