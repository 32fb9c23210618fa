use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rowseek::bases::{ensure_dir, list_datasets, remove_dataset, render_listing};
use rowseek::classify::Category;
use rowseek::menu::Menu;
use rowseek::render::{ConsoleSink, JsonSink};
use rowseek::search::{search, search_with_summary};
use rowseek::settings::{CliOverrides, Settings};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search local CSV datasets by phone number, email or username"
)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the datasets
    #[arg(long, global = true)]
    bases_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every dataset for a record
    Search {
        /// Kind of record to look for
        #[arg(value_enum)]
        category: Category,

        /// Text to look for (matched literally, ignoring case)
        query: String,

        /// Print one JSON object per result or warning instead of tables
        #[arg(long)]
        json: bool,

        /// Maximum characters shown per cell
        #[arg(long = "max-width")]
        max_width: Option<usize>,
    },

    /// Manage dataset files
    Bases {
        #[command(subcommand)]
        action: BasesAction,
    },

    /// Interactive menu
    Menu,
}

#[derive(Subcommand)]
enum BasesAction {
    /// List datasets with size and modification time
    List,

    /// Remove a dataset by its number in the listing
    Remove {
        /// 1-based number from `bases list`
        number: usize,
    },

    /// Print the dataset directory
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let max_width = match &cli.command {
        Some(Commands::Search { max_width, .. }) => *max_width,
        _ => None,
    };
    let settings = Settings::load_from(cli.config.as_deref())?.merge_with_cli(&CliOverrides {
        bases_dir: cli.bases_dir.clone(),
        max_cell_width: max_width,
        no_color: cli.no_color,
        log_level: cli.log_level.clone(),
    })?;

    rowseek::telemetry::init(rowseek::telemetry::parse_level(&settings.log_level)?)?;
    if !settings.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Search {
            category,
            query,
            json,
            ..
        }) => run_search(&settings, category, &query, json),
        Some(Commands::Bases { action }) => run_bases(&settings, action),
        Some(Commands::Menu) | None => {
            ensure_dir(&settings.bases_dir)?;
            Menu::new(io::stdin().lock(), io::stdout().lock(), &settings).run()
        }
    }
}

fn run_search(settings: &Settings, category: Category, query: &str, json: bool) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("query must not be empty");
    }
    let options = settings.search_options();

    if json {
        let mut sink = JsonSink::new(io::stdout().lock());
        let summary = search_with_summary(query, category, &options, &mut sink);
        drop(sink.finish_with_summary(&summary)?);
        return Ok(());
    }

    let mut sink = ConsoleSink::new(io::stdout().lock(), settings.renderer());
    let found = search(query, category, &options, &mut sink);
    drop(sink.finish()?);

    if !found {
        println!("\nNo matches found.");
    }
    Ok(())
}

fn run_bases(settings: &Settings, action: BasesAction) -> Result<()> {
    ensure_dir(&settings.bases_dir)?;
    let options = settings.discover_options();

    match action {
        BasesAction::List => {
            let datasets = list_datasets(&settings.bases_dir, &options)?;
            if datasets.is_empty() {
                println!("No datasets available!");
            } else {
                print!("{}", render_listing(&datasets, &settings.renderer()));
            }
        }
        BasesAction::Remove { number } => {
            let removed = remove_dataset(&settings.bases_dir, &options, number)?;
            println!("Removed {}", removed.name);
        }
        BasesAction::Path => {
            println!("{}", settings.bases_dir.display());
        }
    }

    Ok(())
}
