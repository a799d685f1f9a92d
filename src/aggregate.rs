//! Nutrient aggregation
//!
//! Folds a day's log entries into summed nutrition totals. Each entry's
//! nutrients come from the unit converter's basis rules; bad rows (missing
//! food reference, malformed unit metadata) are reported as warnings and
//! never abort the rest of the batch.

use crate::catalog::FoodCatalog;
use crate::types::{EntryWarning, LogEntry, Totals};
use crate::units::UnitConverter;
use serde::Serialize;

/// Result of aggregating one batch of entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateOutcome {
    /// Unrounded nutrient sums
    pub totals: Totals,
    /// Non-fatal problems found along the way
    pub warnings: Vec<EntryWarning>,
}

/// Aggregator turning (food, stored quantity) entries into daily totals
pub struct NutrientAggregator;

impl NutrientAggregator {
    /// Sum nutrients over a batch of entries.
    ///
    /// Entries referencing a food absent from the catalog contribute zero.
    /// Sums stay unrounded; callers round once at the cache boundary via
    /// `DailyTotals::from_totals`.
    pub fn aggregate(entries: &[LogEntry], catalog: &FoodCatalog) -> AggregateOutcome {
        let mut outcome = AggregateOutcome::default();

        for entry in entries {
            let Some(food) = catalog.lookup(&entry.food_name) else {
                log::warn!(
                    "log entry {} references unknown food '{}'; counting zero",
                    entry.id,
                    entry.food_name
                );
                outcome
                    .warnings
                    .push(EntryWarning::MissingFood(entry.food_name.clone()));
                continue;
            };

            if let Some(warning) = UnitConverter::metadata_warning(food) {
                outcome.warnings.push(warning);
            }

            outcome
                .totals
                .add(UnitConverter::nutrients_for(food, entry.stored_quantity));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_catalog() -> FoodCatalog {
        FoodCatalog::builtin().unwrap()
    }

    #[test]
    fn test_empty_batch_is_all_zeros() {
        let outcome = NutrientAggregator::aggregate(&[], &make_catalog());

        assert_eq!(outcome.totals, Totals::default());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_mixed_bases_sum() {
        let catalog = make_catalog();
        let entries = vec![
            // 200 g of chicken: 330 kcal, 62 g protein
            LogEntry::new("Chicken Breast", 200.0),
            // 2 eggs (piece basis): 156 kcal, 12.6 g protein
            LogEntry::new("Egg", 2.0),
            // 2 slices of bread stored as 50 g: 132.5 kcal
            LogEntry::new("Bread", 50.0),
        ];

        let outcome = NutrientAggregator::aggregate(&entries, &catalog);

        assert!(outcome.warnings.is_empty());
        assert!((outcome.totals.calories - (330.0 + 156.0 + 132.5)).abs() < 1e-9);
        assert!((outcome.totals.protein - (62.0 + 12.6 + 4.5)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_food_counts_zero_and_continues() {
        let catalog = make_catalog();
        let entries = vec![
            LogEntry::new("Chicken Breast", 100.0),
            LogEntry::new("Unobtainium", 500.0),
            LogEntry::new("Egg", 1.0),
        ];

        let outcome = NutrientAggregator::aggregate(&entries, &catalog);

        assert_eq!(
            outcome.warnings,
            vec![EntryWarning::MissingFood("Unobtainium".to_string())]
        );
        // Remaining entries still counted
        assert!((outcome.totals.calories - (165.0 + 78.0)).abs() < 1e-9);
    }

    #[test]
    fn test_order_independence() {
        let catalog = make_catalog();
        let entries = vec![
            LogEntry::new("Chicken Breast", 137.0),
            LogEntry::new("Egg", 3.0),
            LogEntry::new("Oats", 40.0),
            LogEntry::new("Banana", 1.0),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();

        let forward = NutrientAggregator::aggregate(&entries, &catalog);
        let backward = NutrientAggregator::aggregate(&reversed, &catalog);

        assert!((forward.totals.calories - backward.totals.calories).abs() < 1e-9);
        assert!((forward.totals.protein - backward.totals.protein).abs() < 1e-9);
        assert!((forward.totals.carbs - backward.totals.carbs).abs() < 1e-9);
        assert!((forward.totals.fats - backward.totals.fats).abs() < 1e-9);
    }

    #[test]
    fn test_sums_stay_unrounded() {
        let catalog = make_catalog();
        // 3 eggs: protein 18.9 g, not an integer
        let entries = vec![LogEntry::new("Egg", 3.0)];

        let outcome = NutrientAggregator::aggregate(&entries, &catalog);
        assert!((outcome.totals.protein - 18.9).abs() < 1e-9);
    }
}
