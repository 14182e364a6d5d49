//! Quotes
//!
//! Turns an occupancy into an itemised linen breakdown and a marked-up total.
//! All amounts keep full precision; display rounding is left to renderers.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{LinenItem, PriceKey},
    occupancy::OccupancyInput,
    prices::UnitPriceTable,
    quantities::{DerivedQuantities, compute_quantities},
};

/// Multiplier applied to the raw cost before rounding.
pub const MARKUP: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Totals are rounded up to a multiple of this amount.
pub const ROUNDING_STEP: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Line items on a quote, at most one per catalog entry.
pub type LineItems = SmallVec<[LineItem; 12]>;

/// The price table cannot serve a quote.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A price needed by the quote is absent from the table.
    #[error("price table has no entry for {key}")]
    MissingPrice {
        /// Missing key
        key: PriceKey,
    },

    /// The table does not price every key.
    #[error("price table is missing entries for: {}", join_keys(.missing))]
    IncompleteTable {
        /// Missing keys, in [`PriceKey::ALL`] order
        missing: Vec<PriceKey>,
    },
}

fn join_keys(keys: &[PriceKey]) -> String {
    keys.iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One priced row of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog item
    pub item: LinenItem,

    /// Price-table entry used
    pub key: PriceKey,

    /// Display label
    pub label: &'static str,

    /// Price of a single unit
    pub unit_price: Decimal,

    /// Number of units, always above zero
    pub quantity: u64,

    /// `quantity × unit_price`
    pub subtotal: Decimal,
}

/// Priced breakdown of an occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    guest_count: u64,
    line_items: LineItems,
    linen_subtotal: Decimal,
    staff_hours: Decimal,
    staff_cost: Decimal,
    raw_total: Decimal,
    total: Decimal,
    margin: Decimal,
    #[serde(serialize_with = "serialize_currency")]
    currency: &'static Currency,
}

impl QuoteResult {
    /// Number of guests the property sleeps
    pub fn guest_count(&self) -> u64 {
        self.guest_count
    }

    /// Priced rows in canonical order, zero-quantity items omitted
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Sum of all line item subtotals
    pub fn linen_subtotal(&self) -> Decimal {
        self.linen_subtotal
    }

    /// Staff hours the quote was computed with
    pub fn staff_hours(&self) -> Decimal {
        self.staff_hours
    }

    /// Staff hours times the hourly rate
    pub fn staff_cost(&self) -> Decimal {
        self.staff_cost
    }

    /// Marked-up cost before rounding
    pub fn raw_total(&self) -> Decimal {
        self.raw_total
    }

    /// Final price, a multiple of [`ROUNDING_STEP`]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// `total − linen_subtotal − staff_cost`
    ///
    /// The identity holds while amounts stay below [`Decimal::MAX`]. Once the
    /// cost saturates, the margin is clamped to zero instead.
    pub fn margin(&self) -> Decimal {
        self.margin
    }

    /// Share of the total that is margin. Zero for an empty quote.
    pub fn margin_percent(&self) -> Percentage {
        if self.total.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(self.margin / self.total)
    }

    /// Currency of every amount on the quote
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Wraps an amount from this quote as money in the quote currency.
    pub fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, self.currency)
    }

    /// Returns true if the quote has no line items and no staff cost.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty() && self.staff_cost.is_zero()
    }
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "signature required by serde"
)]
fn serialize_currency<S: Serializer>(
    currency: &&'static Currency,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(currency.iso_alpha_code)
}

/// Prices every non-zero quantity, in canonical order.
///
/// # Errors
///
/// - [`ConfigurationError::MissingPrice`]: an item with a non-zero quantity has no price.
pub fn build_line_items(
    quantities: &DerivedQuantities,
    prices: &UnitPriceTable,
) -> Result<LineItems, ConfigurationError> {
    quantities
        .non_zero()
        .map(|(item, quantity)| {
            let key = item.price_key();
            let unit_price = prices.require(key)?;

            Ok(LineItem {
                item,
                key,
                label: item.label(),
                unit_price,
                quantity,
                subtotal: unit_price.saturating_mul(Decimal::from(quantity)),
            })
        })
        .collect()
}

/// Rounds `value` up to the next multiple of `step`.
///
/// Values that already are a multiple are returned unchanged. A zero step
/// leaves the value as is. Uses the exact remainder, so no digit of `value`
/// is lost to the precision of a quotient.
pub fn round_up_to_step(value: Decimal, step: Decimal) -> Decimal {
    match value.checked_rem(step) {
        Some(remainder) if !remainder.is_zero() => (value - remainder).saturating_add(step),
        _ => value,
    }
}

/// Computes the full quote for an occupancy.
///
/// Arithmetic saturates at [`Decimal::MAX`], so oversized inputs never abort a
/// quote. A saturated quote no longer satisfies the margin identity documented
/// on [`QuoteResult::margin`].
///
/// # Errors
///
/// - [`ConfigurationError::MissingPrice`]: a price needed by the occupancy is absent.
pub fn compute_quote(
    input: &OccupancyInput,
    prices: &UnitPriceTable,
) -> Result<QuoteResult, ConfigurationError> {
    let quantities = compute_quantities(
        input.double_beds(),
        input.single_beds(),
        input.kitchens(),
        input.bathrooms(),
    );

    let line_items = build_line_items(&quantities, prices)?;

    let linen_subtotal = line_items
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal));

    let staff_hours = input.staff_hours();

    // The rate is only needed once someone is actually booked.
    let staff_cost = if staff_hours.is_zero() {
        Decimal::ZERO
    } else {
        staff_hours.saturating_mul(prices.require(PriceKey::StaffHourRate)?)
    };

    let cost = linen_subtotal.saturating_add(staff_cost);
    let raw_total = cost.saturating_mul(MARKUP);
    let total = round_up_to_step(raw_total, ROUNDING_STEP);
    let margin = total.saturating_sub(cost);

    debug!(
        guest_count = quantities.guest_count,
        lines = line_items.len(),
        %linen_subtotal,
        %staff_cost,
        %total,
        "computed quote"
    );

    Ok(QuoteResult {
        guest_count: quantities.guest_count,
        line_items,
        linen_subtotal,
        staff_hours,
        staff_cost,
        raw_total,
        total,
        margin,
        currency: prices.currency(),
    })
}

/// Quotes occupancies against a fixed price table.
#[derive(Debug, Clone, Copy)]
pub struct QuoteEngine<'p> {
    prices: &'p UnitPriceTable,
}

impl<'p> QuoteEngine<'p> {
    /// Creates an engine over the given price table.
    pub fn new(prices: &'p UnitPriceTable) -> Self {
        Self { prices }
    }

    /// Price table used by this engine
    pub fn prices(&self) -> &'p UnitPriceTable {
        self.prices
    }

    /// Computes the quote for `input`.
    ///
    /// # Errors
    ///
    /// See [`compute_quote`].
    pub fn quote(&self, input: &OccupancyInput) -> Result<QuoteResult, ConfigurationError> {
        compute_quote(input, self.prices)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn scenario() -> OccupancyInput {
        OccupancyInput::new(1, 0, 1, 1, dec!(2))
    }

    #[test]
    fn rounding_goes_up_to_the_next_five() {
        assert_eq!(round_up_to_step(dec!(101), ROUNDING_STEP), dec!(105));
        assert_eq!(round_up_to_step(dec!(100), ROUNDING_STEP), dec!(100));
        assert_eq!(round_up_to_step(dec!(0), ROUNDING_STEP), dec!(0));
        assert_eq!(round_up_to_step(dec!(91.83), ROUNDING_STEP), dec!(95));
        assert_eq!(round_up_to_step(dec!(0.01), ROUNDING_STEP), dec!(5));
    }

    #[test]
    fn rounding_keeps_the_last_decimal_digit() {
        assert_eq!(
            round_up_to_step(dec!(5.0000000000000000000000000001), ROUNDING_STEP),
            dec!(10)
        );
        assert_eq!(
            round_up_to_step(dec!(9.999999999999999999999999999), ROUNDING_STEP),
            dec!(10)
        );
    }

    #[test]
    fn hours_with_many_decimals_never_round_below_raw_total() -> TestResult {
        let mut prices = UnitPriceTable::new(iso::EUR);
        prices.set(PriceKey::StaffHourRate, dec!(1))?;

        let input =
            OccupancyInput::default().with_staff_hours(dec!(3.3333333333333333333333333334));
        let quote = compute_quote(&input, &prices)?;

        assert_eq!(quote.raw_total(), dec!(5.0000000000000000000000000001));
        assert_eq!(quote.total(), dec!(10));
        assert!(quote.total() >= quote.raw_total(), "total below raw total");

        Ok(())
    }

    #[test]
    fn saturated_quote_clamps_the_margin() -> TestResult {
        let mut prices = UnitPriceTable::new(iso::EUR);
        prices.set(PriceKey::StaffHourRate, Decimal::MAX)?;

        let quote = compute_quote(&OccupancyInput::default().with_staff_hours(dec!(2)), &prices)?;

        assert_eq!(quote.staff_cost(), Decimal::MAX);
        assert_eq!(quote.total(), Decimal::MAX);
        assert_eq!(quote.margin(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn zero_step_leaves_value_alone() {
        assert_eq!(round_up_to_step(dec!(12.34), Decimal::ZERO), dec!(12.34));
    }

    #[test]
    fn reference_scenario_matches_hand_calculation() -> TestResult {
        let quote = compute_quote(&scenario(), &UnitPriceTable::standard())?;

        assert_eq!(quote.guest_count(), 2);
        assert_eq!(quote.line_items().len(), 11);
        assert_eq!(quote.linen_subtotal(), dec!(11.22));
        assert_eq!(quote.staff_cost(), dec!(50.00));
        assert_eq!(quote.raw_total(), dec!(91.83));
        assert_eq!(quote.total(), dec!(95));
        assert_eq!(quote.margin(), dec!(33.78));
        assert_eq!(quote.currency(), iso::EUR);

        Ok(())
    }

    #[test]
    fn line_subtotals_are_quantity_times_price() -> TestResult {
        let quote = compute_quote(&scenario(), &UnitPriceTable::standard())?;

        let double_sheets = quote.line_items().first().ok_or("no line items")?;

        assert_eq!(double_sheets.item, LinenItem::DoubleSheets);
        assert_eq!(double_sheets.quantity, 3);
        assert_eq!(double_sheets.unit_price, dec!(1.18));
        assert_eq!(double_sheets.subtotal, dec!(3.54));

        Ok(())
    }

    #[test]
    fn missing_price_for_a_demanded_item_fails() {
        let mut prices = UnitPriceTable::standard();
        prices.remove(PriceKey::Bidet);

        assert_eq!(
            compute_quote(&scenario(), &prices),
            Err(ConfigurationError::MissingPrice {
                key: PriceKey::Bidet
            })
        );
    }

    #[test]
    fn missing_price_for_an_unused_item_is_ignored() -> TestResult {
        let mut prices = UnitPriceTable::standard();
        prices.remove(PriceKey::SingoloMillerighe);

        let quote = compute_quote(&scenario(), &prices)?;
        assert_eq!(quote.total(), dec!(95));

        Ok(())
    }

    #[test]
    fn staff_rate_is_needed_only_with_staff_hours() -> TestResult {
        let mut prices = UnitPriceTable::standard();
        prices.remove(PriceKey::StaffHourRate);

        let without_staff = scenario().with_staff_hours(Decimal::ZERO);
        assert_eq!(compute_quote(&without_staff, &prices)?.staff_cost(), dec!(0));

        assert_eq!(
            compute_quote(&scenario(), &prices),
            Err(ConfigurationError::MissingPrice {
                key: PriceKey::StaffHourRate
            })
        );

        Ok(())
    }

    #[test]
    fn empty_occupancy_gives_an_empty_quote() -> TestResult {
        let quote = compute_quote(&OccupancyInput::default(), &UnitPriceTable::standard())?;

        assert!(quote.is_empty());
        assert!(quote.line_items().is_empty());
        assert_eq!(quote.linen_subtotal(), Decimal::ZERO);
        assert_eq!(quote.staff_cost(), Decimal::ZERO);
        assert_eq!(quote.total(), Decimal::ZERO);
        assert_eq!(quote.margin(), Decimal::ZERO);
        assert_eq!(quote.margin_percent() * Decimal::ONE, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn engine_delegates_to_compute_quote() -> TestResult {
        let prices = UnitPriceTable::standard();
        let engine = QuoteEngine::new(&prices);

        assert_eq!(engine.quote(&scenario())?, compute_quote(&scenario(), &prices)?);

        Ok(())
    }

    #[test]
    fn incomplete_table_message_lists_keys() {
        let err = ConfigurationError::IncompleteTable {
            missing: vec![PriceKey::Viso, PriceKey::Bidet],
        };

        assert_eq!(
            err.to_string(),
            "price table is missing entries for: viso, bidet"
        );
    }

    #[test]
    fn quote_serialises_currency_as_code() -> TestResult {
        let quote = compute_quote(&scenario(), &UnitPriceTable::standard())?;
        let json = serde_json::to_value(&quote)?;

        assert_eq!(json.pointer("/currency"), Some(&json!("EUR")));
        assert_eq!(json.pointer("/guestCount"), Some(&json!(2)));
        assert_eq!(
            json.pointer("/lineItems/0/key"),
            Some(&json!("matrimonialeMillerighe"))
        );

        Ok(())
    }
}
