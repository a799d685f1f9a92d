//! Unit conversion
//!
//! Entered quantities are stored in a canonical basis: gram amounts for
//! gram-rated foods, piece counts for piece-rated foods. This module resolves
//! which storage basis a food uses, converts entered quantities forward into
//! that basis, and derives the display view (unit count + per-entry
//! nutrients) back from a stored quantity.

use crate::types::{EntryWarning, FoodDefinition, FoodUnit, MacroRates};
use serde::{Deserialize, Serialize};

/// Grams in one teaspoon of the spoon-measured oil entry
pub const TEASPOON_GRAMS: f64 = 5.0;

/// Grams in one tablespoon of the spoon-measured oil entry
pub const TABLESPOON_GRAMS: f64 = 15.0;

/// Spoon size chosen at entry time for the spoon-selectable oil food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoonUnit {
    Teaspoon,
    Tablespoon,
}

impl SpoonUnit {
    pub fn grams(&self) -> f64 {
        match self {
            SpoonUnit::Teaspoon => TEASPOON_GRAMS,
            SpoonUnit::Tablespoon => TABLESPOON_GRAMS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpoonUnit::Teaspoon => "tsp",
            SpoonUnit::Tablespoon => "tbsp",
        }
    }
}

/// Storage basis a food's quantities are kept in, resolved once per food and
/// reused for both forward and reverse conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBasis {
    /// Stored quantity is a piece count; nutrients use per-piece rates
    Piece,
    /// Stored quantity is grams, entered as units of this many grams each
    UnitSize(f64),
    /// Stored quantity is grams, entered as grams
    Gram,
    /// Stored quantity is grams, entered as teaspoons/tablespoons chosen at
    /// entry time (oil special case)
    Spoon,
}

/// Reverse-derived view of one logged entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDisplay {
    /// Quantity in the food's entry unit (pieces, spoons, slices, grams)
    pub display_units: f64,
    /// Label for the unit the quantity is shown in
    pub unit_label: &'static str,
    /// Nutrients contributed by this entry
    pub nutrients: MacroRates,
    /// Set when unit metadata forced a gram-interpretation fallback
    pub warning: Option<EntryWarning>,
}

/// Converter between entered quantities and canonical stored quantities
pub struct UnitConverter;

impl UnitConverter {
    /// Resolve a food's storage basis.
    ///
    /// Priority order, later rules being fallbacks for malformed metadata:
    /// 1. spoon-selectable entry -> `Spoon`
    /// 2. piece unit with per-piece rates and no unit size -> `Piece`
    /// 3. unit size present on a non-gram unit -> `UnitSize`
    /// 4. anything else -> `Gram`
    pub fn resolve_basis(food: &FoodDefinition) -> StorageBasis {
        if food.spoon_selectable {
            return StorageBasis::Spoon;
        }
        if food.unit == FoodUnit::Piece && food.per_piece.is_some() && food.unit_size_g.is_none() {
            return StorageBasis::Piece;
        }
        if food.unit != FoodUnit::Gram {
            if let Some(size) = food.unit_size_g {
                return StorageBasis::UnitSize(size);
            }
        }
        StorageBasis::Gram
    }

    /// Check the food's unit metadata for the gram-fallback case: a non-gram
    /// unit with no way to convert (no unit size, no per-piece rates).
    pub fn metadata_warning(food: &FoodDefinition) -> Option<EntryWarning> {
        if Self::resolve_basis(food) == StorageBasis::Gram
            && food.unit != FoodUnit::Gram
            && food.per_piece.is_none()
        {
            log::warn!(
                "food '{}' has unit '{}' but no unit size or per-piece rates; treating stored quantity as grams",
                food.name,
                food.unit.label()
            );
            return Some(EntryWarning::MalformedUnitMetadata(food.name.clone()));
        }
        None
    }

    /// Convert an entered quantity into the stored quantity.
    ///
    /// `spoon` applies only to the spoon-selectable oil entry and defaults to
    /// teaspoon when not chosen.
    pub fn to_stored(food: &FoodDefinition, entered_quantity: f64, spoon: Option<SpoonUnit>) -> f64 {
        match Self::resolve_basis(food) {
            StorageBasis::Spoon => {
                entered_quantity * spoon.unwrap_or(SpoonUnit::Teaspoon).grams()
            }
            StorageBasis::Piece => entered_quantity,
            StorageBasis::UnitSize(size) => entered_quantity * size,
            StorageBasis::Gram => entered_quantity,
        }
    }

    /// Nutrients contributed by a stored quantity of a food.
    ///
    /// Pairs the basis decision with the matching rate table: piece counts
    /// with per-piece rates, gram amounts with per-100g rates. Missing rate
    /// tables contribute zero.
    pub fn nutrients_for(food: &FoodDefinition, stored_quantity: f64) -> MacroRates {
        match Self::resolve_basis(food) {
            StorageBasis::Piece => food
                .per_piece
                .unwrap_or_default()
                .scaled(stored_quantity),
            StorageBasis::Spoon | StorageBasis::UnitSize(_) | StorageBasis::Gram => food
                .per_100g
                .unwrap_or_default()
                .scaled(stored_quantity / 100.0),
        }
    }

    /// Derive the display view of a stored quantity: which unit to label it
    /// with, how many of that unit, and the entry's nutrients.
    pub fn describe(food: &FoodDefinition, stored_quantity: f64) -> EntryDisplay {
        let nutrients = Self::nutrients_for(food, stored_quantity);

        match Self::resolve_basis(food) {
            StorageBasis::Spoon => {
                let spoon = infer_spoon(stored_quantity);
                EntryDisplay {
                    display_units: stored_quantity / spoon.grams(),
                    unit_label: spoon.label(),
                    nutrients,
                    warning: None,
                }
            }
            StorageBasis::Piece => EntryDisplay {
                display_units: stored_quantity,
                unit_label: food.unit.label(),
                nutrients,
                warning: None,
            },
            StorageBasis::UnitSize(size) => EntryDisplay {
                display_units: stored_quantity / size,
                unit_label: food.unit.label(),
                nutrients,
                warning: None,
            },
            StorageBasis::Gram => EntryDisplay {
                display_units: stored_quantity,
                unit_label: FoodUnit::Gram.label(),
                nutrients,
                warning: Self::metadata_warning(food),
            },
        }
    }
}

/// Infer which spoon an oil quantity was entered with.
///
/// Lossy heuristic: the stored grams do not record the chosen spoon, so a
/// quantity that is a non-zero multiple of 15 g is read back as tablespoons
/// even if it was entered as teaspoons (15 g shows as "1 tbsp", never
/// "3 tsp").
fn infer_spoon(stored_quantity: f64) -> SpoonUnit {
    if stored_quantity >= TABLESPOON_GRAMS {
        let ratio = stored_quantity / TABLESPOON_GRAMS;
        if (ratio - ratio.round()).abs() < 1e-9 {
            return SpoonUnit::Tablespoon;
        }
    }
    SpoonUnit::Teaspoon
}
