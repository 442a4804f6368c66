//! Marmita CLI - Terminal front-end for the storefront cart.
//!
//! # Usage
//!
//! ```bash
//! # Replay UI actions (one JSON object per line) against a fresh cart
//! marmita session --script demo.jsonl
//!
//! # Interactive: type actions on stdin
//! marmita session
//!
//! # Show the stored allergy/goal preferences
//! marmita prefs show
//!
//! # Overwrite the stored preferences
//! marmita prefs register --allergy gluten,peanut --goal hipertrofia
//!
//! # List the menu
//! marmita menu
//! ```
//!
//! # Commands
//!
//! - `session` - Drive a storefront session from JSON-line actions
//! - `prefs` - Inspect or overwrite the preference snapshot
//! - `menu` - List catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marmita_storefront::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "marmita")]
#[command(author, version, about = "Marmita storefront cart")]
struct Cli {
    /// Directory holding the preference snapshot (overrides `MARMITA_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Product catalog YAML file (overrides `MARMITA_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cart session from JSON-line UI actions
    Session {
        /// Read actions from this file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Print outcomes and views as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Manage stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// List the products on the menu
    Menu,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the stored preferences
    Show,
    /// Overwrite the stored preferences
    Register {
        /// Allergy tag (repeatable, or comma-separated)
        #[arg(short, long = "allergy", value_delimiter = ',')]
        allergies: Vec<String>,

        /// Dietary goal (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,
    },
}

fn init_tracing(json: bool) {
    // Logs go to stderr; stdout carries the cart output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marmita_storefront=info,marmita=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }

    match cli.command {
        Commands::Session { script, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            commands::session::run(&config, script.as_deref(), format)?;
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::prefs::show(&config)?,
            PrefsAction::Register { allergies, goals } => {
                commands::prefs::register(&config, &allergies, &goals)?;
            }
        },
        Commands::Menu => commands::menu::list(&config)?,
    }
    Ok(())
}
