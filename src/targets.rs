//! Target calculation
//!
//! Body profile + config constants -> BMR, maintenance, and macro/calorie
//! targets. Pure arithmetic over pre-validated positive inputs; the fixed
//! step order matters and is kept explicit in `compute_with_overrides`.

use crate::config::RecompConfig;
use crate::types::{round2, round_half_up, Gender, Profile, RecompTargets};
use serde::{Deserialize, Serialize};

/// Calculator producing `RecompTargets` from a profile
pub struct TargetCalculator;

impl TargetCalculator {
    /// Basal metabolic rate per Mifflin-St Jeor, unrounded.
    ///
    /// 10 x weight + 6.25 x height - 5 x age, +5 for male / -161 for female.
    pub fn bmr(profile: &Profile) -> f64 {
        let base =
            10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
        match profile.gender {
            Gender::Male => base + 5.0,
            Gender::Female => base - 161.0,
        }
    }

    /// Compute targets with the config's default macro ratios
    pub fn compute(config: &RecompConfig, profile: &Profile) -> RecompTargets {
        Self::compute_with_overrides(config, profile, None, None)
    }

    /// Compute targets, optionally overriding the protein/fat grams-per-kg
    /// ratios.
    ///
    /// Step order is fixed: carbs are sized from the calories left under the
    /// upper bound after protein and fat, then capped at the config max. The
    /// cap has no floor at zero, so a very low maintenance or very high
    /// protein/fat allocation yields a negative carb target on purpose. The
    /// final `recomp_calories` is the sum of macro calories, which only
    /// equals the upper bound when carbs are uncapped and the remainder
    /// divides evenly.
    pub fn compute_with_overrides(
        config: &RecompConfig,
        profile: &Profile,
        protein_ratio: Option<f64>,
        fat_ratio: Option<f64>,
    ) -> RecompTargets {
        let bmr = Self::bmr(profile);
        let maintenance = round_half_up(bmr * config.activity.multiplier);
        let upper_bound = maintenance - config.recomp.subtract_value;

        let protein_ratio = protein_ratio.unwrap_or(config.protein.ratio_per_kg);
        let fat_ratio = fat_ratio.unwrap_or(config.fat.ratio_per_kg);
        let protein = round_half_up(profile.weight_kg * protein_ratio);
        let fats = round_half_up(profile.weight_kg * fat_ratio);

        let protein_calories = protein * config.protein.calories_per_gram;
        let fat_calories = fats * config.fat.calories_per_gram;

        let remaining_calories = upper_bound - protein_calories - fat_calories;
        let calculated_carbs = round_half_up(remaining_calories / config.carbs.calories_per_gram);
        let carbs = calculated_carbs.min(config.carbs.max);
        let carb_calories = carbs * config.carbs.calories_per_gram;

        let recomp_calories = protein_calories + fat_calories + carb_calories;
        let deficit_percentage = round2(100.0 * (maintenance - recomp_calories) / maintenance);

        RecompTargets {
            bmr: round_half_up(bmr) as i64,
            maintenance: maintenance as i64,
            recomp_calories,
            deficit_percentage,
            protein: protein as i64,
            fats: fats as i64,
            carbs: carbs as i64,
            protein_calories,
            fat_calories,
            carb_calories,
        }
    }
}

/// Upper calorie bound used to size carbs and to judge compliance:
/// maintenance minus the config subtract value.
pub fn upper_bound_calories(config: &RecompConfig, targets: &RecompTargets) -> f64 {
    targets.maintenance as f64 - config.recomp.subtract_value
}

/// Display-side intake derivations.
///
/// Expected intake is the midpoint of the buffered range above the macro
/// floor, and its deficit figures are distinct from the macro-floor
/// `deficit_percentage` on `RecompTargets` -- the dashboard shows both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeOutlook {
    /// Midpoint of [macro floor + buffer min, macro floor + buffer max]
    pub expected_intake: i64,
    /// Maintenance minus expected intake
    pub effective_deficit: i64,
    /// Effective deficit as a percentage of maintenance, 2 decimal places
    pub effective_deficit_percent: f64,
}

impl IntakeOutlook {
    pub fn from_targets(config: &RecompConfig, targets: &RecompTargets) -> Self {
        let expected_intake = round_half_up(
            (targets.recomp_calories
                + config.recomp.intake_buffer_min
                + targets.recomp_calories
                + config.recomp.intake_buffer_max)
                / 2.0,
        ) as i64;
        let effective_deficit = targets.maintenance - expected_intake;
        let effective_deficit_percent =
            round2(100.0 * effective_deficit as f64 / targets.maintenance as f64);

        Self {
            expected_intake,
            effective_deficit,
            effective_deficit_percent,
        }
    }
}
