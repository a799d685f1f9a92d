//! Core types for the recomp calculation pipeline
//!
//! This module defines the records that flow through each stage: body profile,
//! food definitions, log entries, running totals, and computed targets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological gender used by the Mifflin-St Jeor BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Self-reported activity level.
///
/// Collected and stored on the profile, but maintenance currently uses one
/// shared multiplier from config for every level (see `RecompConfig`). Kept
/// on the profile so the data survives if per-level multipliers land later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

/// Body-composition profile, the input to target calculation.
///
/// All numeric values must be positive. Validation is the caller's contract;
/// the calculation core performs pure arithmetic and never rejects input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Body weight (kilograms)
    pub weight_kg: f64,
    /// Height (centimeters)
    pub height_cm: f64,
    /// Age (years)
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
}

/// Measurement unit a food is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "slice")]
    Slice,
}

impl FoodUnit {
    /// Short label shown next to quantities in entry displays
    pub fn label(&self) -> &'static str {
        match self {
            FoodUnit::Gram => "g",
            FoodUnit::Piece => "piece",
            FoodUnit::Teaspoon => "tsp",
            FoodUnit::Tablespoon => "tbsp",
            FoodUnit::Slice => "slice",
        }
    }
}

/// Nutrient rates: per 100 g for gram-basis foods, per piece for piece-basis
/// foods. Which table applies is decided by storage-basis resolution and the
/// two must never be mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRates {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroRates {
    /// Scale all four rates by a factor (grams/100 or piece count)
    pub fn scaled(&self, factor: f64) -> MacroRates {
        MacroRates {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
        }
    }
}

/// A food catalog entry.
///
/// Carries EITHER per-100g rates or per-piece rates (piece-basis foods).
/// `unit_size_g` is grams per one unit for non-gram, non-piece units
/// (e.g. grams per slice). `spoon_selectable` marks the designated oil entry
/// whose display unit (teaspoon/tablespoon) is chosen at entry time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDefinition {
    /// Unique name, acts as the identifier across builtin and custom sources
    pub name: String,
    pub unit: FoodUnit,
    #[serde(default)]
    pub per_100g: Option<MacroRates>,
    #[serde(default)]
    pub per_piece: Option<MacroRates>,
    /// Grams represented by one unit, when unit is not gram/piece
    #[serde(default)]
    pub unit_size_g: Option<f64>,
    /// Runtime-selectable teaspoon/tablespoon entry unit (oil special case)
    #[serde(default)]
    pub spoon_selectable: bool,
    #[serde(default)]
    pub notes: Option<String>,
    /// True for user-defined entries, false for builtin catalog entries
    #[serde(default)]
    pub custom: bool,
}

/// One logged food row.
///
/// `stored_quantity` is already in storage basis: a gram amount for
/// gram-basis foods, a piece count for piece-basis foods. Its meaning is
/// re-derived from the referenced food's unit metadata at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Foreign key into the merged food catalog
    pub food_name: String,
    pub stored_quantity: f64,
}

impl LogEntry {
    pub fn new(food_name: impl Into<String>, stored_quantity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_name: food_name.into(),
            stored_quantity,
        }
    }
}

/// All entries logged against one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub date: NaiveDate,
    pub entries: Vec<LogEntry>,
}

/// Unrounded running nutrition totals.
///
/// Summation stays in floats so rounding error does not compound across
/// entries; rounding happens once at the `DailyTotals` boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Totals {
    /// Accumulate one entry's nutrients into the running totals
    pub fn add(&mut self, nutrients: MacroRates) {
        self.calories += nutrients.calories;
        self.protein += nutrients.protein;
        self.carbs += nutrients.carbs;
        self.fats += nutrients.fats;
    }
}

/// Cached per-day aggregate, rounded to whole grams/calories.
///
/// Derived data: always reconstructible from the day's entries plus the food
/// catalog, and recomputed wholesale whenever an entry is added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

impl DailyTotals {
    /// Round unrounded totals at the cache/display boundary
    pub fn from_totals(date: NaiveDate, totals: &Totals) -> Self {
        Self {
            date,
            calories: round_half_up(totals.calories) as i64,
            protein: round_half_up(totals.protein) as i64,
            carbs: round_half_up(totals.carbs) as i64,
            fats: round_half_up(totals.fats) as i64,
        }
    }
}

/// Computed recomp targets for one profile + config.
///
/// `recomp_calories` is the macro floor (sum of macro calories) and is not in
/// general equal to the upper bound `maintenance - subtract_value`; the two
/// only coincide when carbs are uncapped and the remainder divides evenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecompTargets {
    /// Basal metabolic rate, rounded
    pub bmr: i64,
    /// Maintenance calories, rounded
    pub maintenance: i64,
    /// Macro-floor calories (protein + fat + carb calories, unrounded)
    pub recomp_calories: f64,
    /// Deficit vs maintenance implied by the macro floor, 2 decimal places
    pub deficit_percentage: f64,
    /// Protein target (grams)
    pub protein: i64,
    /// Fat target (grams)
    pub fats: i64,
    /// Carb target (grams). Capped at the config max; can go negative when
    /// protein + fat calories already exceed the upper bound.
    pub carbs: i64,
    pub protein_calories: f64,
    pub fat_calories: f64,
    pub carb_calories: f64,
}

/// Non-fatal data problem noticed while converting or aggregating entries.
///
/// Warnings never abort a batch; the affected entry falls back (gram
/// interpretation) or contributes zero (missing food) and processing
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "food")]
pub enum EntryWarning {
    /// Entry references a food name absent from the merged catalog
    MissingFood(String),
    /// Non-gram unit with neither a unit size nor per-piece rates
    MalformedUnitMetadata(String),
}

/// Round half-values toward positive infinity, matching the rounding the
/// dashboard has always displayed (`-12.5` rounds to `-12`, not `-13`).
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to two decimal places with the same half-up rule
pub(crate) fn round2(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}
