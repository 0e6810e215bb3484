mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use clap::Parser;
use cli::{Cli, Commands, SampleArgs};
use config::Config;
use datasources::{catalog_source, CatalogSource, FileCatalog};
use error::{NutriRootError, Result};
use logic::crop_tips::crop_recommendation;
use logic::rules::WarningEngine;
use logic::{analyze_soil, CatalogCache};
use models::SoilSample;
use report::{AlertsView, MatchesView, ReportView, RulesView, TipView};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if matches!(e, NutriRootError::Config(_)) {
            eprintln!("Run `nutriroot init` or copy config/config.yaml.example to config/config.yaml");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load(cli.config.as_ref())?,
    };
    let json = cli.json;

    match cli.command {
        Commands::Analyze(args) => {
            let sample = read_sample(args, &config)?;
            let report = analyze_soil(&sample);
            if json {
                println!("{}", report::to_json(Some(&sample), &report)?);
            } else {
                print!(
                    "{}",
                    ReportView {
                        sample: &sample,
                        report: &report,
                    }
                );
            }
        }
        Commands::Alerts(args) => {
            let sample = read_sample(args, &config)?;
            let alerts = AlertsView::new(&analyze_soil(&sample).warnings);
            if json {
                println!("{}", report::to_json(Some(&sample), &alerts)?);
            } else {
                print!("{}", alerts);
            }
        }
        Commands::Crops {
            sample,
            catalog,
            top,
        } => {
            let sample = read_sample(sample, &config)?;
            let source: Arc<dyn CatalogSource> = match catalog {
                Some(path) => Arc::new(FileCatalog::new(path)),
                None => catalog_source(&config.catalog)?,
            };
            let cache = CatalogCache::new(source);
            tracing::debug!(source = %cache.source().describe(), "Ranking crops");

            let mut matches = cache.rank(&sample).await?;
            let top = top.unwrap_or(config.display.top_matches);
            if json {
                matches.truncate(top);
                println!("{}", report::to_json(Some(&sample), &matches)?);
            } else {
                print!(
                    "{}",
                    MatchesView {
                        matches: &matches,
                        sample: &sample,
                        top,
                    }
                );
            }
        }
        Commands::Tip { crop } => {
            let tip = crop_recommendation(&crop);
            if json {
                println!("{}", report::to_json(None, &tip)?);
            } else {
                print!("{}", TipView { crop: &crop, tip: &tip });
            }
        }
        Commands::Rules => {
            let rules = WarningEngine::new().list_rules();
            if json {
                println!("{}", report::to_json(None, &rules)?);
            } else {
                print!("{}", RulesView { rules: &rules });
            }
        }
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Check => check(&config, cli.config.as_ref()).await?,
    }

    Ok(())
}

fn read_sample(args: SampleArgs, config: &Config) -> Result<SoilSample> {
    let sample = args.into_raw()?.validate(&config.display.default_crop)?;
    tracing::debug!(?sample, "Validated soil sample");
    Ok(sample)
}

/// Validate config and test the crop catalog connection.
async fn check(config: &Config, config_override: Option<&PathBuf>) -> Result<()> {
    if Config::exists(config_override) {
        println!("Config:  OK");
    } else {
        println!(
            "Config:  not found, using defaults (would be written to {})",
            Config::default_config_path()?.display()
        );
    }
    tracing::debug!(catalog = ?config.catalog, "Catalog settings");

    let source = catalog_source(&config.catalog)?;
    let describe = source.describe();
    match source.test_connection().await {
        Ok(true) => println!("Catalog: OK ({})", describe),
        Ok(false) => {
            println!("Catalog: UNREACHABLE ({})", describe);
            return Err(NutriRootError::CatalogUnavailable(describe));
        }
        Err(e) => {
            println!("Catalog: ERROR ({}): {}", describe, e);
            return Err(e);
        }
    }

    let crops = CatalogCache::new(source).get().await?;
    let incomplete = crops
        .iter()
        .filter(|c| {
            c.soil_requirements
                .as_ref()
                .map_or(true, |r| !r.missing().is_empty())
        })
        .count();
    println!(
        "Crops:   {} loaded, {} with incomplete soil requirements",
        crops.len(),
        incomplete
    );

    Ok(())
}
