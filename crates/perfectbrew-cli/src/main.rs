use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use perfectbrew_core::{
    CoffeeDescriptor, DiagnosticConfig, ExtractionCharacteristics, KnowledgeBase,
};
use perfectbrew_engine::{
    Diagnostician, FeedbackRecord, Recipe, TargetCalculator, UserTastePreferences,
    recommend_recipes,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod display;

#[derive(Parser)]
#[command(
    name = "perfectbrew",
    version,
    about = "Coffee extraction diagnostics: target profiles, brew diagnosis and recipe matching"
)]
struct Cli {
    /// Diagnostic house rules (TOML). Defaults apply when omitted.
    #[arg(long, global = true, env = "PERFECTBREW_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding varieties.json and processes.json.
    #[arg(long, global = true, env = "PERFECTBREW_KNOWLEDGE_BASE")]
    knowledge_base: Option<PathBuf>,

    /// Log rule decisions at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the ideal extraction profile for a coffee.
    Target {
        /// Coffee descriptor (JSON).
        #[arg(long)]
        coffee: PathBuf,

        /// Taste preferences (JSON) to personalise the target.
        #[arg(long)]
        preferences: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Diagnose a brew from tasting feedback.
    Diagnose {
        /// Brew method name, e.g. "V60" or "AeroPress Inverted".
        #[arg(short, long)]
        method: String,

        /// Tasting feedback (JSON).
        #[arg(short, long)]
        feedback: PathBuf,

        /// Coffee descriptor (JSON). Without it the diagnosis uses raw taste levels.
        #[arg(short, long)]
        coffee: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Rank recipes by how well they suit a coffee.
    Match {
        /// Coffee descriptor (JSON).
        #[arg(long)]
        coffee: PathBuf,

        /// Recipe list (JSON array).
        #[arg(long)]
        recipes: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Print the adjustment impact ranking for each brew method.
    Methods,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("perfectbrew v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Target {
            coffee,
            preferences,
            json,
        } => {
            let knowledge = load_knowledge(cli.knowledge_base.as_deref())?;
            let coffee: CoffeeDescriptor = read_json(&coffee, "coffee descriptor")?;
            let preferences: Option<UserTastePreferences> = preferences
                .as_deref()
                .map(|p| read_json(p, "taste preferences"))
                .transpose()?;
            cmd_target(&knowledge, &coffee, preferences.as_ref(), json)
        }
        Command::Diagnose {
            method,
            feedback,
            coffee,
            json,
        } => {
            let diagnostician = Diagnostician::new(
                load_knowledge(cli.knowledge_base.as_deref())?,
                load_config(cli.config.as_deref())?,
            );
            let feedback: FeedbackRecord = read_json(&feedback, "feedback")?;
            let coffee: Option<CoffeeDescriptor> = coffee
                .as_deref()
                .map(|p| read_json(p, "coffee descriptor"))
                .transpose()?;
            cmd_diagnose(&diagnostician, coffee.as_ref(), &method, &feedback, json)
        }
        Command::Match {
            coffee,
            recipes,
            json,
        } => {
            let coffee: CoffeeDescriptor = read_json(&coffee, "coffee descriptor")?;
            let recipes: Vec<Recipe> = read_json(&recipes, "recipes")?;
            cmd_match(&coffee, &recipes, json)
        }
        Command::Methods => {
            display::print_method_rankings();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Loading ──

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what} in {}", path.display()))
}

fn load_knowledge(dir: Option<&Path>) -> anyhow::Result<KnowledgeBase> {
    match dir {
        Some(dir) => {
            let kb = KnowledgeBase::load_dir(dir)
                .with_context(|| format!("failed to load knowledge base from {}", dir.display()))?;
            debug!(
                varieties = kb.varieties().len(),
                processes = kb.processes().len(),
                "custom knowledge base"
            );
            Ok(kb)
        }
        None => Ok(KnowledgeBase::builtin()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DiagnosticConfig> {
    match path {
        Some(path) => DiagnosticConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(DiagnosticConfig::default()),
    }
}

// ── Commands ──

/// Target card data. `coffee_fit` scores the coffee's own target against
/// the user's preferences, before any personalisation.
#[derive(Debug, Serialize)]
struct TargetReport {
    coffee: String,
    target: ExtractionCharacteristics,
    #[serde(skip_serializing_if = "Option::is_none")]
    personalized: Option<ExtractionCharacteristics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coffee_fit: Option<u32>,
}

impl TargetReport {
    fn build(
        knowledge: &KnowledgeBase,
        coffee: &CoffeeDescriptor,
        preferences: Option<&UserTastePreferences>,
    ) -> Self {
        let calculator = TargetCalculator::new(knowledge);
        let target = calculator.compute(coffee);
        Self {
            coffee: coffee.name.clone(),
            target,
            personalized: preferences.map(|p| calculator.compute_personalized(coffee, p)),
            coffee_fit: preferences.map(|p| p.preference_alignment_score(&target)),
        }
    }
}

fn cmd_target(
    knowledge: &KnowledgeBase,
    coffee: &CoffeeDescriptor,
    preferences: Option<&UserTastePreferences>,
    json: bool,
) -> anyhow::Result<()> {
    let report = TargetReport::build(knowledge, coffee, preferences);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display::print_coffee_header(coffee);
    display::print_profile("Target Profile", &report.target);
    if let Some(score) = report.coffee_fit {
        println!("  {:<26} {}/100", "fit with your taste", score);
        println!();
    }
    if let Some(profile) = &report.personalized {
        display::print_profile("Personalised Target", profile);
    }
    Ok(())
}

fn cmd_diagnose(
    diagnostician: &Diagnostician,
    coffee: Option<&CoffeeDescriptor>,
    method: &str,
    feedback: &FeedbackRecord,
    json: bool,
) -> anyhow::Result<()> {
    let result = diagnostician.diagnose(coffee, method, feedback);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(coffee) = coffee {
        display::print_coffee_header(coffee);
    }
    display::print_diagnosis(&result);
    Ok(())
}

fn cmd_match(coffee: &CoffeeDescriptor, recipes: &[Recipe], json: bool) -> anyhow::Result<()> {
    let matches = recommend_recipes(coffee, recipes);
    info!(candidates = recipes.len(), matched = matches.len(), "ranked recipes");

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    display::print_coffee_header(coffee);
    display::print_recipe_matches(&matches);
    Ok(())
}
