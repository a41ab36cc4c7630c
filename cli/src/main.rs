//! lvt CLI - Main entry point
//!
//! Scaffolding helpers for schema-driven web apps: generate tables and
//! migrations, inspect `schema.sql`, and seed fake data.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use lvt_cli::commands::{fields, generate, resource, seed};
use lvt_cli::config::Config;
use lvt_cli::error::CliError;
use lvt_cli::output;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "LVT_LOG";

/// lvt - scaffolding CLI for schema-driven web apps
#[derive(Parser, Debug)]
#[command(name = "lvt")]
#[command(author, version, about = "Scaffolding CLI for schema-driven web apps", long_about = None)]
struct Cli {
    /// Path to config file (default: lvt.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate code from field declarations
    Gen {
        #[command(subcommand)]
        target: GenTarget,
    },

    /// Show how field declarations are interpreted
    Fields {
        /// Field declarations (name:type)
        #[arg(required = true, value_name = "FIELD")]
        fields: Vec<String>,

        /// Infer types for bare field names
        #[arg(long)]
        infer: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect resources defined in schema.sql
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Insert fake rows into a resource table
    Seed {
        /// Resource (table) name
        resource: String,

        /// Number of rows to insert (default: seed.count from lvt.toml)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,

        /// Delete previously seeded rows instead of inserting
        #[arg(long, conflicts_with_all = ["count", "seed"])]
        cleanup: bool,

        /// SQLite database file (default: database.path from lvt.toml)
        #[arg(long, env = "LVT_DATABASE", value_name = "PATH")]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum GenTarget {
    /// Append a table to schema.sql and write its migration
    Schema {
        /// Table name (converted to snake_case)
        table: String,

        /// Field declarations (name:type)
        #[arg(required = true, value_name = "FIELD")]
        fields: Vec<String>,

        /// Infer types for bare field names
        #[arg(long)]
        infer: bool,

        /// Print the SQL without writing any files
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ResourceAction {
    /// List tables found in schema.sql
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show columns, indexes and example values of a table
    Describe {
        /// Resource (table) name
        name: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::err_line(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Fields {
            fields: tokens,
            infer,
            json,
        } => fields::run(&tokens, infer, json),
        Command::Gen { target } => {
            let config = load_config(cli.config.as_deref())?;
            match target {
                GenTarget::Schema {
                    table,
                    fields,
                    infer,
                    dry_run,
                } => generate::run(
                    &config,
                    generate::GenerateOptions {
                        table: &table,
                        fields: &fields,
                        infer,
                        dry_run,
                    },
                ),
            }
        }
        Command::Resource { action } => {
            let config = load_config(cli.config.as_deref())?;
            match action {
                ResourceAction::List { json } => resource::list(&config, json),
                ResourceAction::Describe { name, json } => resource::describe(&config, &name, json),
            }
        }
        Command::Seed {
            resource,
            count,
            seed: rng_seed,
            cleanup,
            db,
        } => {
            let config = load_config(cli.config.as_deref())?;
            seed::run(
                &config,
                seed::SeedOptions {
                    resource: &resource,
                    count,
                    seed: rng_seed,
                    cleanup,
                    db,
                },
            )
        }
    }
}

/// Load configuration from `--config` or the working directory
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config, CliError> {
    match custom_path {
        Some(path) => Config::load_from(path).map_err(Into::into),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| CliError::IoError(format!("failed to read working directory: {e}")))?;
            Config::load(&cwd).map_err(Into::into)
        }
    }
}
