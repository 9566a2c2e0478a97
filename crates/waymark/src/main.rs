//! Waymark admin CLI.
//!
//! Mutating commands (exclude/include/set-message) write to the user config
//! file, or to `--config` when given. `last` resolves the database through
//! the full config load order.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use waymark::{admin, ZonePolicy};
use wayconf::{ConfigFile, WaymarkConfig};
use waystore::LocationStore;

/// Waymark - last-position tracking administration
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a zone to the exclusion list
    Exclude { zone: String },

    /// Remove a zone from the exclusion list
    Include { zone: String },

    /// List excluded zones
    Exclusions,

    /// Replace a notification template
    /// (keys: restored, zone_excluded, no_prior_location)
    SetMessage { key: String, text: String },

    /// Print the stored position for a user in a zone
    Last { user: String, zone: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(wayconf::default_user_config_path);

    match cli.command {
        Command::Exclude { zone } => {
            let mut policy = ZonePolicy::new(ConfigFile::open(&config_path)?);
            println!("{}", admin::add_exclusion(&mut policy, &zone)?);
        }
        Command::Include { zone } => {
            let mut policy = ZonePolicy::new(ConfigFile::open(&config_path)?);
            println!("{}", admin::remove_exclusion(&mut policy, &zone)?);
        }
        Command::Exclusions => {
            let policy = ZonePolicy::new(ConfigFile::open(&config_path)?);
            println!("{}", admin::list_exclusions(&policy));
        }
        Command::SetMessage { key, text } => {
            let mut file = ConfigFile::open(&config_path)?;
            println!("{}", admin::set_message(&mut file, &key, &text)?);
        }
        Command::Last { user, zone } => {
            let config =
                WaymarkConfig::load_from(cli.config.as_deref()).context("loading config")?;
            let store = LocationStore::open(config.paths.db_path());
            match store.load(&user, &zone) {
                Some(record) => println!("{}", record.position),
                None => println!("No saved position for {} in {}.", user, zone),
            }
            store.close();
        }
    }

    Ok(())
}
