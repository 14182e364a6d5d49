//! Derived quantities

use serde::Serialize;

use crate::catalog::LinenItem;

/// Item counts derived from an occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedQuantities {
    /// Two guests per double bed plus one per single bed
    pub guest_count: u64,
    /// Double sheets, three per double bed
    pub double_sheets: u64,
    /// Single sheets, three per single bed
    pub single_sheets: u64,
    /// Pillowcases, one per guest
    pub pillowcases: u64,
    /// Face towels, one per guest
    pub face_towels: u64,
    /// Bidet towels, one per guest
    pub bidet_towels: u64,
    /// Body towels, one per guest
    pub body_towels: u64,
    /// Courtesy kits, one per guest
    pub courtesy_kits: u64,
    /// Slippers, one pair per guest
    pub slippers: u64,
    /// Kitchen cloths, one per kitchen
    pub kitchen_cloths: u64,
    /// Kitchen kits, one per kitchen
    pub kitchen_kits: u64,
    /// Bath mats, one per bathroom
    pub bath_mats: u64,
    /// Toilet paper rolls, one per bathroom
    pub toilet_paper_rolls: u64,
}

impl DerivedQuantities {
    /// Quantity of the given item.
    pub fn quantity(&self, item: LinenItem) -> u64 {
        match item {
            LinenItem::DoubleSheets => self.double_sheets,
            LinenItem::SingleSheets => self.single_sheets,
            LinenItem::Pillowcases => self.pillowcases,
            LinenItem::FaceTowels => self.face_towels,
            LinenItem::BidetTowels => self.bidet_towels,
            LinenItem::BodyTowels => self.body_towels,
            LinenItem::CourtesyKits => self.courtesy_kits,
            LinenItem::Slippers => self.slippers,
            LinenItem::KitchenCloths => self.kitchen_cloths,
            LinenItem::KitchenKits => self.kitchen_kits,
            LinenItem::BathMats => self.bath_mats,
            LinenItem::ToiletPaper => self.toilet_paper_rolls,
        }
    }

    /// Items with a non-zero quantity, in canonical order.
    pub fn non_zero(&self) -> impl Iterator<Item = (LinenItem, u64)> + '_ {
        LinenItem::CANONICAL_ORDER
            .into_iter()
            .map(|item| (item, self.quantity(item)))
            .filter(|&(_, quantity)| quantity > 0)
    }
}

/// Derives per-item quantities from room and bed counts.
pub fn compute_quantities(
    double_beds: u32,
    single_beds: u32,
    kitchens: u32,
    bathrooms: u32,
) -> DerivedQuantities {
    let double_beds = u64::from(double_beds);
    let single_beds = u64::from(single_beds);
    let kitchens = u64::from(kitchens);
    let bathrooms = u64::from(bathrooms);

    let guest_count = double_beds * 2 + single_beds;

    DerivedQuantities {
        guest_count,
        double_sheets: double_beds * 3,
        single_sheets: single_beds * 3,
        pillowcases: guest_count,
        face_towels: guest_count,
        bidet_towels: guest_count,
        body_towels: guest_count,
        courtesy_kits: guest_count,
        slippers: guest_count,
        kitchen_cloths: kitchens,
        kitchen_kits: kitchens,
        bath_mats: bathrooms,
        toilet_paper_rolls: bathrooms,
    }
}
