//! Catalog
//!
//! The fixed set of price-table keys and the linen items a quote is built from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key of an entry in a [`UnitPriceTable`](crate::prices::UnitPriceTable).
///
/// The serialised names match the configuration keys used in price fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceKey {
    /// Kitchen cloth.
    Canovaccio,

    /// Double waffle-weave sheet set.
    MatrimonialeMillerighe,

    /// Single waffle-weave sheet set.
    SingoloMillerighe,

    /// Waffle-weave pillowcase.
    FedereMillerighe,

    /// Kitchen consumables kit.
    KitCucina,

    /// Bath mat.
    Scendibagno,

    /// Face towel.
    Viso,

    /// Bidet towel.
    Bidet,

    /// Body towel.
    Corpo,

    /// Toilet paper roll.
    Cartaigienica,

    /// Guest courtesy kit.
    KitCortesia,

    /// Pair of slippers.
    Ciabattine,

    /// Hourly rate for cleaning staff.
    #[serde(alias = "minuti")]
    StaffHourRate,
}

impl PriceKey {
    /// Every price key, in configuration order.
    pub const ALL: [PriceKey; 13] = [
        PriceKey::Canovaccio,
        PriceKey::MatrimonialeMillerighe,
        PriceKey::SingoloMillerighe,
        PriceKey::FedereMillerighe,
        PriceKey::KitCucina,
        PriceKey::Scendibagno,
        PriceKey::Viso,
        PriceKey::Bidet,
        PriceKey::Corpo,
        PriceKey::Cartaigienica,
        PriceKey::KitCortesia,
        PriceKey::Ciabattine,
        PriceKey::StaffHourRate,
    ];

    /// Configuration name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            PriceKey::Canovaccio => "canovaccio",
            PriceKey::MatrimonialeMillerighe => "matrimonialeMillerighe",
            PriceKey::SingoloMillerighe => "singoloMillerighe",
            PriceKey::FedereMillerighe => "federeMillerighe",
            PriceKey::KitCucina => "kitCucina",
            PriceKey::Scendibagno => "scendibagno",
            PriceKey::Viso => "viso",
            PriceKey::Bidet => "bidet",
            PriceKey::Corpo => "corpo",
            PriceKey::Cartaigienica => "cartaigienica",
            PriceKey::KitCortesia => "kitCortesia",
            PriceKey::Ciabattine => "ciabattine",
            PriceKey::StaffHourRate => "staffHourRate",
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`PriceKey`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown price key: {0}")]
pub struct UnknownPriceKey(pub String);

impl FromStr for PriceKey {
    type Err = UnknownPriceKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `minuti` is the legacy name of the staff rate.
        if s == "minuti" {
            return Ok(PriceKey::StaffHourRate);
        }

        PriceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownPriceKey(s.to_string()))
    }
}

/// A consumable that can appear as a line on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinenItem {
    /// Double bed sheets, three per double bed.
    DoubleSheets,

    /// Single bed sheets, three per single bed.
    SingleSheets,

    /// One pillowcase per guest.
    Pillowcases,

    /// One face towel per guest.
    FaceTowels,

    /// One bidet towel per guest.
    BidetTowels,

    /// One body towel per guest.
    BodyTowels,

    /// One courtesy kit per guest.
    CourtesyKits,

    /// One pair of slippers per guest.
    Slippers,

    /// One cloth per kitchen.
    KitchenCloths,

    /// One consumables kit per kitchen.
    KitchenKits,

    /// One mat per bathroom.
    BathMats,

    /// One roll per bathroom.
    ToiletPaper,
}

impl LinenItem {
    /// The order line items appear in on every quote.
    pub const CANONICAL_ORDER: [LinenItem; 12] = [
        LinenItem::DoubleSheets,
        LinenItem::SingleSheets,
        LinenItem::Pillowcases,
        LinenItem::FaceTowels,
        LinenItem::BidetTowels,
        LinenItem::BodyTowels,
        LinenItem::CourtesyKits,
        LinenItem::Slippers,
        LinenItem::KitchenCloths,
        LinenItem::KitchenKits,
        LinenItem::BathMats,
        LinenItem::ToiletPaper,
    ];

    /// Price-table entry used to price this item.
    pub fn price_key(self) -> PriceKey {
        match self {
            LinenItem::DoubleSheets => PriceKey::MatrimonialeMillerighe,
            LinenItem::SingleSheets => PriceKey::SingoloMillerighe,
            LinenItem::Pillowcases => PriceKey::FedereMillerighe,
            LinenItem::FaceTowels => PriceKey::Viso,
            LinenItem::BidetTowels => PriceKey::Bidet,
            LinenItem::BodyTowels => PriceKey::Corpo,
            LinenItem::CourtesyKits => PriceKey::KitCortesia,
            LinenItem::Slippers => PriceKey::Ciabattine,
            LinenItem::KitchenCloths => PriceKey::Canovaccio,
            LinenItem::KitchenKits => PriceKey::KitCucina,
            LinenItem::BathMats => PriceKey::Scendibagno,
            LinenItem::ToiletPaper => PriceKey::Cartaigienica,
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            LinenItem::DoubleSheets => "Double sheets",
            LinenItem::SingleSheets => "Single sheets",
            LinenItem::Pillowcases => "Pillowcases",
            LinenItem::FaceTowels => "Face towels",
            LinenItem::BidetTowels => "Bidet towels",
            LinenItem::BodyTowels => "Body towels",
            LinenItem::CourtesyKits => "Courtesy kits",
            LinenItem::Slippers => "Slippers",
            LinenItem::KitchenCloths => "Kitchen cloths",
            LinenItem::KitchenKits => "Kitchen kits",
            LinenItem::BathMats => "Bath mats",
            LinenItem::ToiletPaper => "Toilet paper",
        }
    }
}
