//! Recomp Engine - deterministic calculation core for a body-recomposition
//! diet dashboard
//!
//! The engine turns a body profile into calorie/macro targets, heterogeneous
//! logged food quantities into normalized daily totals, and cached totals
//! into per-day compliance classifications:
//! profile → targets; food + entered quantity → stored quantity → daily
//! totals; totals + targets → day classification.
//!
//! ## Modules
//!
//! - **targets**: BMR, maintenance, and macro targets from a profile
//! - **units**: storage-basis resolution and forward/reverse unit conversion
//! - **aggregate**: per-entry nutrients folded into daily totals
//! - **compliance**: day classification against the calorie corridor
//! - **catalog**: builtin + custom food lookup merged by name
//!
//! Everything is synchronous and side-effect free; persistence and "today"
//! resolution belong to the caller.

pub mod aggregate;
pub mod catalog;
pub mod compliance;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod targets;
pub mod types;
pub mod units;

pub use aggregate::{AggregateOutcome, NutrientAggregator};
pub use catalog::FoodCatalog;
pub use compliance::{ComplianceEvaluator, DayClassification};
pub use config::RecompConfig;
pub use error::EngineError;
pub use pipeline::{DayOutcome, RecompEngine};
pub use targets::{upper_bound_calories, IntakeOutlook, TargetCalculator};
pub use types::{
    ActivityLevel, DailyTotals, DayLog, EntryWarning, FoodDefinition, FoodUnit, Gender, LogEntry,
    MacroRates, Profile, RecompTargets, Totals,
};
pub use units::{EntryDisplay, SpoonUnit, StorageBasis, UnitConverter};

/// Engine version embedded in CLI output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
