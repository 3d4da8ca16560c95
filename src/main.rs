use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod config;
mod logging;
mod record;
mod report;
mod store;
mod validate;
mod wizard;

use config::Config;
use store::EventStore;
use wizard::{Step, WizardSession};

#[derive(Parser)]
#[command(name = "eventplan", about = "Event planning wizard core", version)]
struct Cli {
    /// Path to a config file (overrides eventplan.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Force debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List stored events, newest first
    List,
    /// Show a stored event record
    Show { id: i64 },
    /// Validate a stored event, step by step
    Validate {
        id: i64,
        /// Check a single step index instead of all steps
        #[arg(long)]
        step: Option<usize>,
    },
    /// Export the summary and per-category spreadsheets for an event
    Export {
        id: i64,
        /// Output directory (defaults to the configured exports path)
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logging = logging::init_logging(&config, cli.debug)?;

    let store = EventStore::open(&config.data_path()).context("Failed to open event store")?;

    match cli.command {
        Command::List => list_events(&store),
        Command::Show { id } => show_event(&store, id),
        Command::Validate { id, step } => validate_event(&config, &store, id, step),
        Command::Export { id, out } => export_event(&config, &store, id, out.as_deref()),
    }
}

fn list_events(store: &EventStore) -> Result<()> {
    let events = store.list_all();
    if events.is_empty() {
        println!("No stored events.");
        return Ok(());
    }
    for event in events {
        println!(
            "{:>4}  {}  {}",
            event.id,
            event.created_at.format("%Y-%m-%d %H:%M"),
            event.name
        );
    }
    Ok(())
}

fn show_event(store: &EventStore, id: i64) -> Result<()> {
    let record = store.load(id);
    if record.id.is_none() {
        println!("Event {id} not found.");
        return Ok(());
    }

    println!("Event: {}", record.display_name());
    if let Some(event_type) = record.event_type {
        println!("Type:  {event_type}");
    }
    if let (Some(start), Some(end)) = (record.start_date, record.end_date) {
        println!("Dates: {start} .. {end}");
    }
    if !record.selected_categories.is_empty() {
        println!("Categories: {}", record.selected_categories.join(", "));
    }
    if let Some(warning) = record.budget_warning() {
        println!("Warning: {warning}");
    }
    Ok(())
}

fn validate_event(config: &Config, store: &EventStore, id: i64, step: Option<usize>) -> Result<()> {
    let record = store.load(id);
    let session = WizardSession::resume(config, record);

    let steps: Vec<Step> = match step {
        Some(i) => vec![Step::from_index(i)],
        None => Step::all().to_vec(),
    };

    let mut all_valid = true;
    for s in steps {
        let result = validate::validate(s, session.record(), config);
        if result.is_valid() {
            println!("{s}: ok");
        } else {
            all_valid = false;
            println!("{s}: missing fields");
            for label in result.labels(config) {
                println!("  - {label}");
            }
        }
    }

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}

fn export_event(config: &Config, store: &EventStore, id: i64, out: Option<&str>) -> Result<()> {
    let record = store.load(id);
    if record.id.is_none() {
        anyhow::bail!("Event {id} not found");
    }

    let exports_dir = out
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| config.exports_path());

    // Report failures surface here as an error notice; the stored record is
    // untouched either way.
    let paths = report::export_all(&record, &exports_dir)
        .with_context(|| format!("Failed to export reports for event {id}"))?;

    println!("Wrote {}", paths.summary.display());
    for path in paths.categories {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
