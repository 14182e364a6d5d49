//! Occupancy
//!
//! The counts a quote is computed from, and the lenient coercion applied to
//! raw form values. Anything that is not a usable non-negative number reads as
//! zero so that partially filled forms still produce a quote.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// Occupancy of a property for one quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyInput {
    double_beds: u32,
    single_beds: u32,
    kitchens: u32,
    bathrooms: u32,
    staff_hours: Decimal,
}

impl OccupancyInput {
    /// Creates an occupancy input. Negative staff hours are treated as zero.
    pub fn new(
        double_beds: u32,
        single_beds: u32,
        kitchens: u32,
        bathrooms: u32,
        staff_hours: Decimal,
    ) -> Self {
        Self {
            double_beds,
            single_beds,
            kitchens,
            bathrooms,
            staff_hours: non_negative(staff_hours),
        }
    }

    /// Number of double beds
    pub fn double_beds(&self) -> u32 {
        self.double_beds
    }

    /// Number of single beds
    pub fn single_beds(&self) -> u32 {
        self.single_beds
    }

    /// Number of kitchens
    pub fn kitchens(&self) -> u32 {
        self.kitchens
    }

    /// Number of bathrooms
    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    /// Hours of cleaning staff, never negative
    pub fn staff_hours(&self) -> Decimal {
        self.staff_hours
    }

    /// Returns a copy with the number of double beds replaced.
    #[must_use]
    pub fn with_double_beds(mut self, double_beds: u32) -> Self {
        self.double_beds = double_beds;
        self
    }

    /// Returns a copy with the number of single beds replaced.
    #[must_use]
    pub fn with_single_beds(mut self, single_beds: u32) -> Self {
        self.single_beds = single_beds;
        self
    }

    /// Returns a copy with the number of kitchens replaced.
    #[must_use]
    pub fn with_kitchens(mut self, kitchens: u32) -> Self {
        self.kitchens = kitchens;
        self
    }

    /// Returns a copy with the number of bathrooms replaced.
    #[must_use]
    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = bathrooms;
        self
    }

    /// Returns a copy with the staff hours replaced. Negative hours become zero.
    #[must_use]
    pub fn with_staff_hours(mut self, staff_hours: Decimal) -> Self {
        self.staff_hours = non_negative(staff_hours);
        self
    }
}

/// A raw form value: either already numeric or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// Numeric value
    Number(Decimal),

    /// Text as typed by the user
    Text(String),
}

impl RawField {
    /// Coerces the value to a count.
    pub fn to_count(&self) -> u32 {
        match self {
            RawField::Number(value) => count_from_decimal(*value),
            RawField::Text(text) => lenient_count(text),
        }
    }

    /// Coerces the value to a number of hours.
    pub fn to_hours(&self) -> Decimal {
        match self {
            RawField::Number(value) => non_negative(*value),
            RawField::Text(text) => lenient_hours(text),
        }
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<Decimal> for RawField {
    fn from(value: Decimal) -> Self {
        RawField::Number(value)
    }
}

/// Raw, possibly incomplete occupancy data as read from a form or fixture.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOccupancy {
    /// Raw number of double beds
    pub double_beds: Option<RawField>,

    /// Raw number of single beds
    pub single_beds: Option<RawField>,

    /// Raw number of kitchens
    pub kitchens: Option<RawField>,

    /// Raw number of bathrooms
    pub bathrooms: Option<RawField>,

    /// Raw staff hours
    pub staff_hours: Option<RawField>,
}

impl RawOccupancy {
    /// Overlays every field set in `other` on top of this one.
    #[must_use]
    pub fn merged_with(self, other: RawOccupancy) -> Self {
        Self {
            double_beds: other.double_beds.or(self.double_beds),
            single_beds: other.single_beds.or(self.single_beds),
            kitchens: other.kitchens.or(self.kitchens),
            bathrooms: other.bathrooms.or(self.bathrooms),
            staff_hours: other.staff_hours.or(self.staff_hours),
        }
    }
}

impl From<&RawOccupancy> for OccupancyInput {
    fn from(raw: &RawOccupancy) -> Self {
        let count = |field: Option<&RawField>| field.map_or(0, RawField::to_count);

        OccupancyInput {
            double_beds: count(raw.double_beds.as_ref()),
            single_beds: count(raw.single_beds.as_ref()),
            kitchens: count(raw.kitchens.as_ref()),
            bathrooms: count(raw.bathrooms.as_ref()),
            staff_hours: raw
                .staff_hours
                .as_ref()
                .map_or(Decimal::ZERO, RawField::to_hours),
        }
    }
}

impl From<RawOccupancy> for OccupancyInput {
    fn from(raw: RawOccupancy) -> Self {
        OccupancyInput::from(&raw)
    }
}

/// Parses a count, reading anything unusable as zero.
///
/// Accepts `,` as the decimal separator. Digit group separators such as
/// `1_000` are not numbers and read as zero. Fractions are truncated and
/// values beyond `u32::MAX` saturate.
pub fn lenient_count(text: &str) -> u32 {
    parse_lenient(text).map_or(0, count_from_decimal)
}

/// Parses a number of hours, reading anything unusable as zero.
pub fn lenient_hours(text: &str) -> Decimal {
    parse_lenient(text).map_or(Decimal::ZERO, non_negative)
}

fn parse_lenient(text: &str) -> Option<Decimal> {
    let normalised = text.trim().replace(',', ".");

    if normalised.is_empty() || normalised.contains('_') {
        return None;
    }

    Decimal::from_str(&normalised).ok()
}

fn count_from_decimal(value: Decimal) -> u32 {
    let whole = non_negative(value).trunc();

    whole.to_u32().unwrap_or(u32::MAX)
}

fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn counts_parse_leniently() {
        assert_eq!(lenient_count("3"), 3);
        assert_eq!(lenient_count("  4 "), 4);
        assert_eq!(lenient_count("2.9"), 2);
        assert_eq!(lenient_count("2,9"), 2);
        assert_eq!(lenient_count(""), 0);
        assert_eq!(lenient_count("abc"), 0);
        assert_eq!(lenient_count("-2"), 0);
        assert_eq!(lenient_count("99999999999"), u32::MAX);
    }

    #[test]
    fn underscore_grouping_is_not_a_number() {
        assert_eq!(lenient_count("1_000"), 0);
        assert_eq!(lenient_hours("1_5"), Decimal::ZERO);
    }

    #[test]
    fn hours_parse_leniently() {
        assert_eq!(lenient_hours("1,5"), dec!(1.5));
        assert_eq!(lenient_hours("2.25"), dec!(2.25));
        assert_eq!(lenient_hours("-3"), Decimal::ZERO);
        assert_eq!(lenient_hours("due"), Decimal::ZERO);
    }

    #[test]
    fn negative_staff_hours_are_clamped() {
        let input = OccupancyInput::new(1, 0, 0, 0, dec!(-2));
        assert_eq!(input.staff_hours(), Decimal::ZERO);

        let input = input.with_staff_hours(dec!(-0.5));
        assert_eq!(input.staff_hours(), Decimal::ZERO);
    }

    #[test]
    fn raw_occupancy_accepts_numbers_and_text() -> TestResult {
        let raw: RawOccupancy = serde_norway::from_str(
            "doubleBeds: 2\nsingleBeds: \"1\"\nkitchens: abc\nstaffHours: 1.5\n",
        )?;

        let input = OccupancyInput::from(&raw);

        assert_eq!(input, OccupancyInput::new(2, 1, 0, 0, dec!(1.5)));

        Ok(())
    }

    #[test]
    fn merged_fields_override_base_fields() {
        let base = RawOccupancy {
            double_beds: Some(RawField::from("2")),
            bathrooms: Some(RawField::from("1")),
            ..RawOccupancy::default()
        };

        let overrides = RawOccupancy {
            double_beds: Some(RawField::from(dec!(3))),
            ..RawOccupancy::default()
        };

        let input = OccupancyInput::from(base.merged_with(overrides));

        assert_eq!(input.double_beds(), 3);
        assert_eq!(input.bathrooms(), 1);
    }
}
