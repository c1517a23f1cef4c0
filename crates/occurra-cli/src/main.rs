//! Occurra — GBIF species occurrence explorer.
//! Entry point for the command-line binary.

mod cli;
mod output;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use occurra_config::Config;
use occurra_ingestion::sources::gbif::GbifClient;
use occurra_ingestion::sources::OccurrenceSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use output::{print_json, print_search, SearchReport, NO_RECORDS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries CSV / JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Search { filters, preview } => {
            let query = filters.to_query(&config.search);
            let table = GbifClient::from_config(&config.gbif)?.search(&query).await?;

            if table.is_empty() {
                warn!("{}", NO_RECORDS);
            }

            if cli.json {
                print_json(SearchReport {
                    species: &query.species,
                    count: table.len(),
                    records: table.records(),
                    summary: table.summary(),
                })?;
            } else if !table.is_empty() {
                print_search(&query.species, &table, preview);
            }
        }
        Commands::Export { filters, out } => {
            let query = filters.to_query(&config.search);
            let table = GbifClient::from_config(&config.gbif)?.search(&query).await?;
            if table.is_empty() {
                warn!("{}", NO_RECORDS);
            }

            let csv = table.to_csv()?;
            match out.as_deref() {
                Some("-") => {
                    use std::io::Write;
                    std::io::stdout().write_all(&csv)?;
                }
                other => {
                    let path = other
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(query.download_file_name()));
                    std::fs::write(&path, &csv)?;
                    if cli.json {
                        print_json(serde_json::json!({
                            "path": path.display().to_string(),
                            "records": table.len(),
                        }))?;
                    } else {
                        println!("wrote {} records to {}", table.len(), path.display());
                    }
                }
            }
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.web.port);
            let addr: SocketAddr = format!("{}:{}", config.web.host, port).parse()?;
            info!("Starting Occurra dashboard");
            let state = occurra_web::state::AppState::new(config)?;
            occurra_web::serve(state, addr).await?;
        }
    }

    Ok(())
}
