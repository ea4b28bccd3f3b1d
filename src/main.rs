use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing::info;

use taskpulse::analytics::AnalyticsEngine;
use taskpulse::cli::args::{Cli, Commands};
use taskpulse::cli::commands;
use taskpulse::config::{ColorSetting, Config, Paths, SourceKind};
use taskpulse::logging::init_logging;
use taskpulse::storage::Database;
use taskpulse::tasks::{JsonTaskFile, TaskSource};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::new()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let config = Config::load_from_path(&config_path)?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let settings = &config.analytics;

    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    let engine = || -> Result<AnalyticsEngine<Box<dyn TaskSource>>> {
        Ok(AnalyticsEngine::new(open_source(&cli, &config, &paths)?).with_now(now))
    };

    let output = match &cli.command {
        Commands::Summary(args) => commands::summary(&engine()?, args, settings, format)?,
        Commands::Productivity => commands::productivity(&engine()?, format)?,
        Commands::Streak => commands::streak(&engine()?, format)?,
        Commands::Categories { period, limit } => {
            commands::categories(&engine()?, period, *limit, settings, format)?
        },
        Commands::Daily(args) => commands::daily(&engine()?, args, settings, format)?,
        Commands::Hourly(args) => commands::hourly(&engine()?, args, settings, format)?,
        Commands::Weekday(args) => commands::weekday(&engine()?, args, settings, format)?,
        Commands::Trend { period, interval } => {
            commands::trend(&engine()?, period, *interval, settings, format)?
        },
        Commands::Import { file } => {
            let database = cli.db.clone().unwrap_or_else(|| match config.source.kind {
                SourceKind::Sqlite => config.source.resolve_path(&paths),
                SourceKind::Json => paths.database.clone(),
            });
            commands::import(file, &database, format)
                .with_context(|| format!("import of {} failed", file.display()))?
        },
    };

    println!("{output}");
    Ok(())
}

/// Pick the task source: `--tasks`, then `--db`, then the configured store.
fn open_source(cli: &Cli, config: &Config, paths: &Paths) -> Result<Box<dyn TaskSource>> {
    if let Some(file) = &cli.tasks {
        info!(path = %file.display(), "reading tasks from JSON file");
        return Ok(Box::new(JsonTaskFile::new(file)));
    }

    if let Some(db) = &cli.db {
        info!(path = %db.display(), "reading tasks from database");
        let database = Database::open_at(db)
            .with_context(|| format!("could not open task database {}", db.display()))?;
        return Ok(Box::new(database));
    }

    let path = config.source.resolve_path(paths);
    match config.source.kind {
        SourceKind::Json => {
            info!(path = %path.display(), "reading tasks from configured JSON file");
            Ok(Box::new(JsonTaskFile::new(path)))
        },
        SourceKind::Sqlite => {
            if config.source.path.is_none() {
                paths.ensure_dirs()?;
            }
            info!(path = %path.display(), "reading tasks from configured database");
            let database = Database::open_at(&path)
                .with_context(|| format!("could not open task database {}", path.display()))?;
            Ok(Box::new(database))
        },
    }
}
