//! Preventivo prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{LinenItem, PriceKey},
    fixtures::{FixtureError, Fixtures},
    occupancy::{OccupancyInput, RawField, RawOccupancy, lenient_count, lenient_hours},
    prices::{PriceTableError, UnitPriceTable},
    quantities::{DerivedQuantities, compute_quantities},
    quote::{
        ConfigurationError, LineItem, MARKUP, QuoteEngine, QuoteResult, ROUNDING_STEP,
        build_line_items, compute_quote, round_up_to_step,
    },
    receipt::{Receipt, ReceiptError},
};
