//! Price Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{catalog::PriceKey, fixtures::FixtureError, prices::UnitPriceTable};

/// Wrapper for prices in YAML
#[derive(Debug, Deserialize)]
pub struct PricesFixture {
    /// Map of price key -> price (e.g., "0.45 EUR")
    pub prices: FxHashMap<String, String>,
}

impl TryFrom<PricesFixture> for UnitPriceTable {
    type Error = FixtureError;

    fn try_from(fixture: PricesFixture) -> Result<Self, Self::Error> {
        let mut table: Option<UnitPriceTable> = None;

        for (name, price) in fixture.prices {
            let key: PriceKey = name.parse()?;
            let (amount, currency) = parse_price(&price)?;

            let entries = table.get_or_insert_with(|| UnitPriceTable::new(currency));

            if entries.currency() != currency {
                return Err(FixtureError::CurrencyMismatch(
                    entries.currency().iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }

            entries.set(key, amount)?;
        }

        table.ok_or(FixtureError::NoPrices)
    }
}

/// Parse price string (e.g., "0.45 EUR") into an exact amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}
