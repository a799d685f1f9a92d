//! Engine facade
//!
//! `RecompEngine` ties a config and a merged food catalog together and
//! exposes the full calculation surface the dashboard calls into: target
//! computation, entry conversion/display, daily recomputation, and day
//! classification.

use crate::aggregate::NutrientAggregator;
use crate::catalog::FoodCatalog;
use crate::compliance::{ComplianceEvaluator, DayClassification};
use crate::config::RecompConfig;
use crate::error::EngineError;
use crate::targets::{upper_bound_calories, IntakeOutlook, TargetCalculator};
use crate::types::{
    DailyTotals, DayLog, EntryWarning, FoodUnit, LogEntry, MacroRates, Profile, RecompTargets,
};
use crate::units::{EntryDisplay, SpoonUnit, UnitConverter};
use serde::Serialize;

/// Result of recomputing one day: the rounded cache row plus any warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOutcome {
    pub totals: DailyTotals,
    pub warnings: Vec<EntryWarning>,
}

/// Stateless calculation engine over a config and a food catalog.
///
/// Every method is a pure function of its inputs plus the held config and
/// catalog snapshot; identical calls return identical results. Persistence
/// and read-modify-write sequencing belong to the caller.
pub struct RecompEngine {
    config: RecompConfig,
    catalog: FoodCatalog,
}

impl RecompEngine {
    pub fn new(config: RecompConfig, catalog: FoodCatalog) -> Self {
        Self { config, catalog }
    }

    /// Engine with the given config over the builtin food catalog
    pub fn with_builtin_catalog(config: RecompConfig) -> Result<Self, EngineError> {
        Ok(Self::new(config, FoodCatalog::builtin()?))
    }

    pub fn config(&self) -> &RecompConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut FoodCatalog {
        &mut self.catalog
    }

    /// Targets for a profile with the config's default macro ratios
    pub fn targets(&self, profile: &Profile) -> RecompTargets {
        TargetCalculator::compute(&self.config, profile)
    }

    /// Targets with per-user protein/fat ratio overrides
    pub fn targets_with_overrides(
        &self,
        profile: &Profile,
        protein_ratio: Option<f64>,
        fat_ratio: Option<f64>,
    ) -> RecompTargets {
        TargetCalculator::compute_with_overrides(&self.config, profile, protein_ratio, fat_ratio)
    }

    /// Display-side expected intake / effective deficit for computed targets
    pub fn intake_outlook(&self, targets: &RecompTargets) -> IntakeOutlook {
        IntakeOutlook::from_targets(&self.config, targets)
    }

    /// Build a log entry from an entered quantity, converting it into the
    /// food's storage basis. Returns `None` when the food is unknown.
    pub fn new_entry(
        &self,
        food_name: &str,
        entered_quantity: f64,
        spoon: Option<SpoonUnit>,
    ) -> Option<LogEntry> {
        let food = self.catalog.lookup(food_name)?;
        let stored = UnitConverter::to_stored(food, entered_quantity, spoon);
        Some(LogEntry::new(food.name.clone(), stored))
    }

    /// Reverse-derive the display view of one logged entry.
    ///
    /// An entry whose food has vanished from the catalog renders as a
    /// zero-nutrient gram row with a `MissingFood` warning, the same
    /// never-fatal treatment aggregation gives it.
    pub fn entry_display(&self, entry: &LogEntry) -> EntryDisplay {
        match self.catalog.lookup(&entry.food_name) {
            Some(food) => UnitConverter::describe(food, entry.stored_quantity),
            None => {
                log::warn!(
                    "log entry {} references unknown food '{}'; rendering as zero grams",
                    entry.id,
                    entry.food_name
                );
                EntryDisplay {
                    display_units: entry.stored_quantity,
                    unit_label: FoodUnit::Gram.label(),
                    nutrients: MacroRates::default(),
                    warning: Some(EntryWarning::MissingFood(entry.food_name.clone())),
                }
            }
        }
    }

    /// Recompute a day's cached totals from scratch.
    ///
    /// Always a full fold over the day's entries; totals are never updated
    /// incrementally, so the cache stays reconstructible.
    pub fn recompute_day(&self, day: &DayLog) -> DayOutcome {
        let outcome = NutrientAggregator::aggregate(&day.entries, &self.catalog);
        DayOutcome {
            totals: DailyTotals::from_totals(day.date, &outcome.totals),
            warnings: outcome.warnings,
        }
    }

    /// Classify a day's cached calorie total against the corridor implied by
    /// the given targets: [macro floor, maintenance - subtract value].
    pub fn classify_day(
        &self,
        day_total_calories: Option<f64>,
        targets: &RecompTargets,
    ) -> DayClassification {
        ComplianceEvaluator::classify(
            day_total_calories,
            targets.recomp_calories,
            upper_bound_calories(&self.config, targets),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityLevel, Gender};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn make_engine() -> RecompEngine {
        RecompEngine::with_builtin_catalog(RecompConfig::default()).unwrap()
    }

    fn make_profile() -> Profile {
        Profile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
        }
    }

    fn make_day(entries: Vec<LogEntry>) -> DayLog {
        DayLog {
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            entries,
        }
    }

    #[test]
    fn test_end_to_end_day() {
        let engine = make_engine();
        let profile = make_profile();

        let targets = engine.targets(&profile);
        assert_eq!(targets.maintenance, 2458);
        assert_eq!(targets.recomp_calories, 1960.0);

        let day = make_day(vec![
            engine.new_entry("Chicken Breast", 200.0, None).unwrap(),
            engine.new_entry("Egg", 3.0, None).unwrap(),
            engine.new_entry("White Rice (cooked)", 150.0, None).unwrap(),
            engine
                .new_entry("Cooking Oil", 2.0, Some(SpoonUnit::Tablespoon))
                .unwrap(),
        ]);

        let outcome = engine.recompute_day(&day);
        assert!(outcome.warnings.is_empty());
        // 330 + 234 + 195 + 265.2 = 1024.2, rounded at the boundary
        assert_eq!(outcome.totals.calories, 1024);
        assert_eq!(outcome.totals.date, day.date);

        // Below the macro floor: not compliant
        assert_eq!(
            engine.classify_day(Some(outcome.totals.calories as f64), &targets),
            DayClassification::NonCompliant
        );
        assert_eq!(
            engine.classify_day(None, &targets),
            DayClassification::NoData
        );
    }

    #[test]
    fn test_corridor_compliance_through_engine() {
        // Profile whose carb remainder divides evenly: the macro floor lands
        // exactly on the upper bound, so the corridor is the single point
        // 2208 kcal
        let engine = make_engine();
        let profile = Profile {
            weight_kg: 80.0,
            height_cm: 180.0,
            age: 25,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
        };

        let targets = engine.targets(&profile);
        assert_eq!(targets.maintenance, 2708);
        assert_eq!(targets.recomp_calories, 2208.0);

        assert_eq!(
            engine.classify_day(Some(2208.0), &targets),
            DayClassification::Compliant
        );
        assert_eq!(
            engine.classify_day(Some(2207.0), &targets),
            DayClassification::NonCompliant
        );
    }

    #[test]
    fn test_entry_display_for_vanished_food() {
        let engine = make_engine();
        let entry = LogEntry::new("Dodo Egg", 120.0);

        let display = engine.entry_display(&entry);
        assert_eq!(display.display_units, 120.0);
        assert_eq!(display.unit_label, "g");
        assert_eq!(display.nutrients, MacroRates::default());
        assert_eq!(
            display.warning,
            Some(EntryWarning::MissingFood("Dodo Egg".to_string()))
        );
    }

    #[test]
    fn test_new_entry_converts_units() {
        let engine = make_engine();

        // 2 slices of bread at 25 g each
        let entry = engine.new_entry("Bread", 2.0, None).unwrap();
        assert_eq!(entry.stored_quantity, 50.0);

        // Piece foods store the count directly
        let eggs = engine.new_entry("Egg", 3.0, None).unwrap();
        assert_eq!(eggs.stored_quantity, 3.0);

        assert!(engine.new_entry("Unknown", 1.0, None).is_none());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let engine = make_engine();
        let day = make_day(vec![
            engine.new_entry("Oats", 60.0, None).unwrap(),
            engine.new_entry("Banana", 1.0, None).unwrap(),
        ]);

        let first = engine.recompute_day(&day);
        let second = engine.recompute_day(&day);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_food_overrides_flow_through() {
        let mut engine = make_engine();
        engine.catalog_mut().insert_custom(crate::types::FoodDefinition {
            name: "Egg".to_string(),
            unit: FoodUnit::Piece,
            per_100g: None,
            per_piece: Some(MacroRates {
                calories: 90.0,
                protein: 7.0,
                carbs: 0.5,
                fats: 6.0,
            }),
            unit_size_g: None,
            spoon_selectable: false,
            notes: None,
            custom: true,
        });

        let day = make_day(vec![engine.new_entry("Egg", 2.0, None).unwrap()]);
        let outcome = engine.recompute_day(&day);
        assert_eq!(outcome.totals.calories, 180);
    }
}
