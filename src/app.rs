//! Quote command

use std::io;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::{OutputFormat, QuoteConfig},
    fixtures::{FixtureError, Fixtures},
    occupancy::{OccupancyInput, RawOccupancy},
    quote::{ConfigurationError, QuoteEngine, QuoteResult},
    receipt::{Receipt, ReceiptError},
};

/// Errors raised while running the quote command.
#[derive(Debug, Error)]
pub enum AppError {
    /// Price table or scenario could not be loaded
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Price table cannot serve the quote
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Table output failed
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// JSON output failed
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Loads the configured price table and occupancy, computes the quote and writes it to `out`.
///
/// # Errors
///
/// Returns an error if fixtures cannot be loaded, the price table cannot
/// serve the quote, or output fails.
pub fn run(config: &QuoteConfig, mut out: impl io::Write) -> Result<QuoteResult, AppError> {
    let fixtures = Fixtures::with_base_path(&config.fixtures_dir);

    let prices = fixtures.load_prices(&config.prices)?;

    info!(
        fixtures = %fixtures.base_path().display(),
        table = %config.prices,
        currency = prices.currency().iso_alpha_code,
        entries = prices.len(),
        "loaded price table"
    );

    for (key, price) in prices.iter() {
        debug!(%key, %price, "unit price");
    }

    if config.strict {
        prices.validate()?;
    }

    let base = match config.scenario.as_deref() {
        Some(name) => {
            let scenario = fixtures.load_occupancy(name)?;

            info!(scenario = name, label = scenario.name.as_deref(), "loaded scenario");

            scenario.occupancy
        }
        None => RawOccupancy::default(),
    };

    let input = OccupancyInput::from(base.merged_with(config.occupancy_overrides()));
    let quote = QuoteEngine::new(&prices).quote(&input)?;

    info!(
        guests = quote.guest_count(),
        total = %quote.total(),
        margin = %quote.margin(),
        "computed quote"
    );

    match config.output {
        OutputFormat::Table => Receipt::new(&quote)
            .with_color(!config.no_color)
            .write_to(&mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &quote)?;
            writeln!(out)?;
        }
    }

    Ok(quote)
}
