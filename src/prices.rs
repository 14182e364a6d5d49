//! Prices

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{catalog::PriceKey, quote::ConfigurationError};

/// Errors raised while building a price table.
#[derive(Debug, Error, PartialEq)]
pub enum PriceTableError {
    /// Unit prices must not be negative.
    #[error("negative unit price for {key}: {price}")]
    NegativePrice {
        /// Offending key
        key: PriceKey,
        /// Rejected price
        price: Decimal,
    },
}

/// Unit prices for every catalog entry plus the staff hourly rate, in a single currency.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPriceTable {
    currency: &'static Currency,
    prices: FxHashMap<PriceKey, Decimal>,
}

impl UnitPriceTable {
    /// Creates an empty price table in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            prices: FxHashMap::default(),
        }
    }

    /// The standard EUR price list.
    pub fn standard() -> Self {
        let prices = [
            (PriceKey::Canovaccio, Decimal::new(45, 2)),
            (PriceKey::MatrimonialeMillerighe, Decimal::new(118, 2)),
            (PriceKey::SingoloMillerighe, Decimal::new(80, 2)),
            (PriceKey::FedereMillerighe, Decimal::new(47, 2)),
            (PriceKey::KitCucina, Decimal::new(60, 2)),
            (PriceKey::Scendibagno, Decimal::new(63, 2)),
            (PriceKey::Viso, Decimal::new(42, 2)),
            (PriceKey::Bidet, Decimal::new(32, 2)),
            (PriceKey::Corpo, Decimal::new(95, 2)),
            (PriceKey::Cartaigienica, Decimal::new(16, 2)),
            (PriceKey::KitCortesia, Decimal::new(36, 2)),
            (PriceKey::Ciabattine, Decimal::new(40, 2)),
            (PriceKey::StaffHourRate, Decimal::new(2500, 2)),
        ];

        Self {
            currency: iso::EUR,
            prices: prices.into_iter().collect(),
        }
    }

    /// Sets the unit price for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - [`PriceTableError::NegativePrice`]: the price is below zero.
    pub fn set(&mut self, key: PriceKey, price: Decimal) -> Result<&mut Self, PriceTableError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PriceTableError::NegativePrice { key, price });
        }

        self.prices.insert(key, price);

        Ok(self)
    }

    /// Removes the price for `key`, returning it if present.
    pub fn remove(&mut self, key: PriceKey) -> Option<Decimal> {
        self.prices.remove(&key)
    }

    /// Returns the unit price for `key`, if configured.
    pub fn get(&self, key: PriceKey) -> Option<Decimal> {
        self.prices.get(&key).copied()
    }

    /// Returns the unit price for `key`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingPrice`]: the table has no entry for `key`.
    pub fn require(&self, key: PriceKey) -> Result<Decimal, ConfigurationError> {
        self.get(key).ok_or(ConfigurationError::MissingPrice { key })
    }

    /// Currency all prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Keys without a price, in [`PriceKey::ALL`] order.
    pub fn missing_keys(&self) -> Vec<PriceKey> {
        PriceKey::ALL
            .into_iter()
            .filter(|key| !self.prices.contains_key(key))
            .collect()
    }

    /// Checks that every key has a price.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::IncompleteTable`]: one or more keys are missing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let missing = self.missing_keys();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::IncompleteTable { missing })
        }
    }

    /// Iterates configured prices in [`PriceKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PriceKey, Decimal)> + '_ {
        PriceKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|price| (key, price)))
    }

    /// Number of configured prices.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no prices are configured.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for UnitPriceTable {
    fn default() -> Self {
        Self::standard()
    }
}
