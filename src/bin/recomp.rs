//! Recomp CLI - command-line front end for the recomp engine
//!
//! Commands:
//! - targets: compute calorie/macro targets for a profile
//! - totals: aggregate a day's logged foods into daily totals
//! - classify: judge a day's calories against a profile's corridor
//! - foods: list the merged food catalog

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use recomp_engine::{
    ActivityLevel, DayLog, EngineError, Gender, IntakeOutlook, Profile, RecompConfig, RecompEngine,
    SpoonUnit, ENGINE_VERSION,
};
use serde::Deserialize;
use thiserror::Error;

/// Recomp - deterministic diet-target and food-log calculator
#[derive(Parser)]
#[command(name = "recomp")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute recomp targets and daily nutrition totals", long_about = None)]
struct Cli {
    /// Config JSON path (defaults to the shipped constants)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra custom-food JSON overlaid on the builtin catalog
    #[arg(long, global = true)]
    custom_foods: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute calorie/macro targets for a profile
    Targets {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Override protein grams per kg
        #[arg(long)]
        protein_ratio: Option<f64>,

        /// Override fat grams per kg
        #[arg(long)]
        fat_ratio: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Aggregate logged foods (NDJSON rows) into daily totals
    Totals {
        /// Input file path (use - for stdin); one JSON row per line:
        /// {"food": "Egg", "quantity": 2} with optional "spoon": "tbsp"
        #[arg(short, long)]
        input: PathBuf,

        /// Day the entries belong to (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a day's calorie total against a profile's corridor
    Classify {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Day total calories (omit for a no-data day)
        #[arg(long)]
        calories: Option<f64>,
    },

    /// List the merged food catalog
    Foods {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct ProfileArgs {
    #[arg(long)]
    weight_kg: f64,

    #[arg(long)]
    height_cm: f64,

    #[arg(long)]
    age: u32,

    #[arg(long, value_enum)]
    gender: CliGender,

    #[arg(long, value_enum, default_value = "moderate")]
    activity: CliActivity,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(g: CliGender) -> Self {
        match g {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliActivity {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl From<CliActivity> for ActivityLevel {
    fn from(a: CliActivity) -> Self {
        match a {
            CliActivity::Sedentary => ActivityLevel::Sedentary,
            CliActivity::Light => ActivityLevel::Light,
            CliActivity::Moderate => ActivityLevel::Moderate,
            CliActivity::Active => ActivityLevel::Active,
        }
    }
}

/// One NDJSON input row for the totals command
#[derive(Deserialize)]
struct InputRow {
    food: String,
    quantity: f64,
    #[serde(default)]
    spoon: Option<CliSpoon>,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CliSpoon {
    Tsp,
    Tbsp,
}

impl From<CliSpoon> for SpoonUnit {
    fn from(s: CliSpoon) -> Self {
        match s {
            CliSpoon::Tsp => SpoonUnit::Teaspoon,
            CliSpoon::Tbsp => SpoonUnit::Tablespoon,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input line {line}: {message}")]
    BadInput { line: usize, message: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let engine = build_engine(cli.config.as_deref(), cli.custom_foods.as_deref())?;

    match cli.command {
        Commands::Targets {
            profile,
            protein_ratio,
            fat_ratio,
            json,
        } => cmd_targets(&engine, &profile.into_profile(), protein_ratio, fat_ratio, json),

        Commands::Totals { input, date, json } => cmd_totals(&engine, &input, date, json),

        Commands::Classify { profile, calories } => {
            cmd_classify(&engine, &profile.into_profile(), calories)
        }

        Commands::Foods { json } => cmd_foods(&engine, json),
    }
}

impl ProfileArgs {
    fn into_profile(self) -> Profile {
        Profile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            gender: self.gender.into(),
            activity_level: self.activity.into(),
        }
    }
}

fn build_engine(
    config_path: Option<&Path>,
    custom_foods_path: Option<&Path>,
) -> Result<RecompEngine, CliError> {
    let config = match config_path {
        Some(path) => RecompConfig::from_json(&fs::read_to_string(path)?)?,
        None => RecompConfig::default(),
    };

    let mut engine = RecompEngine::with_builtin_catalog(config)?;

    if let Some(path) = custom_foods_path {
        let foods = recomp_engine::FoodCatalog::foods_from_json(&fs::read_to_string(path)?)?;
        for food in foods {
            engine.catalog_mut().insert_custom(food);
        }
    }

    Ok(engine)
}

fn cmd_targets(
    engine: &RecompEngine,
    profile: &Profile,
    protein_ratio: Option<f64>,
    fat_ratio: Option<f64>,
    json: bool,
) -> Result<(), CliError> {
    let targets = engine.targets_with_overrides(profile, protein_ratio, fat_ratio);
    let outlook = engine.intake_outlook(&targets);

    if json {
        #[derive(serde::Serialize)]
        struct Report<'a> {
            targets: &'a recomp_engine::RecompTargets,
            outlook: &'a IntakeOutlook,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&Report {
                targets: &targets,
                outlook: &outlook,
            })
            .map_err(EngineError::from)?
        );
        return Ok(());
    }

    println!("BMR:                 {} kcal", targets.bmr);
    println!("Maintenance:         {} kcal", targets.maintenance);
    println!("Macro floor:         {} kcal", targets.recomp_calories);
    println!("Deficit:             {}%", targets.deficit_percentage);
    println!(
        "Protein:             {} g ({} kcal)",
        targets.protein, targets.protein_calories
    );
    println!(
        "Fats:                {} g ({} kcal)",
        targets.fats, targets.fat_calories
    );
    println!(
        "Carbs:               {} g ({} kcal)",
        targets.carbs, targets.carb_calories
    );
    println!("Expected intake:     {} kcal", outlook.expected_intake);
    println!(
        "Effective deficit:   {} kcal ({}%)",
        outlook.effective_deficit, outlook.effective_deficit_percent
    );

    Ok(())
}

fn cmd_totals(
    engine: &RecompEngine,
    input: &Path,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<(), CliError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading log rows from stdin (one JSON object per line, Ctrl-D to finish)");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    // "Today" is resolved here, outside the calculation core
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut entries = Vec::new();
    for (idx, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row: InputRow = serde_json::from_str(line).map_err(|e| CliError::BadInput {
            line: idx + 1,
            message: e.to_string(),
        })?;

        // Unknown foods stay in the batch as raw entries so aggregation can
        // report them as warnings instead of the CLI failing early
        let entry = engine
            .new_entry(&row.food, row.quantity, row.spoon.map(Into::into))
            .unwrap_or_else(|| recomp_engine::LogEntry::new(row.food, row.quantity));
        entries.push(entry);
    }

    let outcome = engine.recompute_day(&DayLog { date, entries });

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).map_err(EngineError::from)?
        );
        return Ok(());
    }

    println!("Totals for {}:", outcome.totals.date);
    println!("  Calories: {} kcal", outcome.totals.calories);
    println!("  Protein:  {} g", outcome.totals.protein);
    println!("  Carbs:    {} g", outcome.totals.carbs);
    println!("  Fats:     {} g", outcome.totals.fats);
    for warning in &outcome.warnings {
        eprintln!("warning: {warning:?}");
    }

    Ok(())
}

fn cmd_classify(
    engine: &RecompEngine,
    profile: &Profile,
    calories: Option<f64>,
) -> Result<(), CliError> {
    let targets = engine.targets(profile);
    let classification = engine.classify_day(calories, &targets);

    println!(
        "corridor: [{} , {}] kcal",
        targets.recomp_calories,
        recomp_engine::upper_bound_calories(engine.config(), &targets)
    );
    println!("{}", classification.as_str());

    Ok(())
}

fn cmd_foods(engine: &RecompEngine, json: bool) -> Result<(), CliError> {
    let foods = engine.catalog().sorted_foods();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&foods).map_err(EngineError::from)?
        );
        return Ok(());
    }

    for food in foods {
        let origin = if food.custom { "custom" } else { "builtin" };
        println!("{:<24} {:<6} {}", food.name, food.unit.label(), origin);
    }

    Ok(())
}
