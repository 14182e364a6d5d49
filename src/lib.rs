//! Preventivo
//!
//! Quote calculator for linen and consumables of short-let properties: turns
//! bed, kitchen and bathroom counts plus staff hours into an itemised,
//! marked-up quote rounded up to the next 5 currency units.
//!
//! ```
//! use preventivo::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let prices = UnitPriceTable::standard();
//! let input = OccupancyInput::new(1, 0, 1, 1, Decimal::from(2));
//!
//! let quote = compute_quote(&input, &prices)?;
//!
//! assert_eq!(quote.guest_count(), 2);
//! assert_eq!(quote.total(), Decimal::from(95));
//! # Ok::<(), ConfigurationError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod logging;
pub mod occupancy;
pub mod prelude;
pub mod prices;
pub mod quantities;
pub mod quote;
pub mod receipt;
