//! Command line configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::occupancy::{RawField, RawOccupancy};

/// How the quote is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,

    /// Serialised quote
    Json,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human readable output
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Preventivo configuration
#[derive(Debug, Parser)]
#[command(
    name = "preventivo",
    about = "Linen and consumables quote calculator",
    long_about = None
)]
pub struct QuoteConfig {
    /// Directory holding `prices/` and `occupancy/` fixtures
    #[arg(long, env = "PREVENTIVO_FIXTURES", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Price table to quote with
    #[arg(short, long, env = "PREVENTIVO_PRICES", default_value = "standard")]
    pub prices: String,

    /// Occupancy scenario to start from
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Number of double beds
    #[arg(long, allow_hyphen_values = true)]
    pub double_beds: Option<String>,

    /// Number of single beds
    #[arg(long, allow_hyphen_values = true)]
    pub single_beds: Option<String>,

    /// Number of kitchens
    #[arg(long, allow_hyphen_values = true)]
    pub kitchens: Option<String>,

    /// Number of bathrooms
    #[arg(long, allow_hyphen_values = true)]
    pub bathrooms: Option<String>,

    /// Hours of cleaning staff
    #[arg(long, allow_hyphen_values = true)]
    pub staff_hours: Option<String>,

    /// Fail unless the price table prices every key
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Disable ANSI colours in table output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl QuoteConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Occupancy fields given on the command line.
    pub fn occupancy_overrides(&self) -> RawOccupancy {
        let field = |value: Option<&String>| value.map(|text| RawField::from(text.as_str()));

        RawOccupancy {
            double_beds: field(self.double_beds.as_ref()),
            single_beds: field(self.single_beds.as_ref()),
            kitchens: field(self.kitchens.as_ref()),
            bathrooms: field(self.bathrooms.as_ref()),
            staff_hours: field(self.staff_hours.as_ref()),
        }
    }
}
