mod cli;
mod config;
mod output;
mod scrape;
mod state;
mod wiring;

use std::path::Path;

use chrono::Utc;
use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ConfigError;
use crate::scrape::ScrapeError;
use crate::wiring::WiringError;
use driftnet_core::error::CoreError;
use driftnet_core::types::{Community, DateRange, FieldFilter};
use driftnet_infra::reddit::{RedditClient, RedditError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid cli: {0}")]
    InvalidCli(String),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("login error: {0}")]
    Login(#[from] RedditError),
    #[error("scrape error: {0}")]
    Scrape(#[from] ScrapeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    config::load_dotenv()?;
    let config = config::AppConfig::from_env()?;

    let communities = resolve_communities(&cli)?;
    let range = DateRange::new(cli.start_date, cli.end_date)?.resolve(Utc::now().date_naive());
    let filter = load_field_filter(&cli)?;
    let cap = cli.cap();

    std::fs::create_dir_all(&cli.output_dir)?;

    let state = wiring::build_state(config)?;

    let live = if cli.update {
        let credentials = state.config.reddit.clone().ok_or_else(|| {
            AppError::InvalidCli(
                "--update requires DRIFTNET_REDDIT_* credentials in the environment".to_string(),
            )
        })?;
        let client = RedditClient::login(
            state.http_client.clone(),
            &credentials,
            &state.config.user_agent,
        )
        .await?;
        info!("logged in to live api");
        Some(client)
    } else {
        None
    };

    for community in &communities {
        let stats = scrape::run(
            &state,
            live.as_ref(),
            community,
            &range,
            cap,
            filter.as_ref(),
            &cli.output_dir,
        )
        .await?;
        info!(community = %community, ?stats, "run complete");
    }

    Ok(())
}

fn resolve_communities(cli: &Cli) -> Result<Vec<Community>, AppError> {
    let names = match (&cli.community, &cli.community_list) {
        (Some(_), Some(_)) => {
            return Err(AppError::InvalidCli(
                "give either --community or --community-list, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(AppError::InvalidCli(
                "either --community or --community-list is required".to_string(),
            ));
        }
        (Some(name), None) => vec![name.clone()],
        (None, Some(path)) => read_name_lines(path)?,
    };
    if names.is_empty() {
        return Err(AppError::InvalidCli("community list is empty".to_string()));
    }
    let mut communities = Vec::with_capacity(names.len());
    for name in &names {
        communities.push(Community::try_from(name.as_str())?);
    }
    Ok(communities)
}

fn read_name_lines(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}

fn load_field_filter(cli: &Cli) -> Result<Option<FieldFilter>, AppError> {
    let Some(path) = &cli.field_list else {
        return Ok(None);
    };
    let contents = std::fs::read_to_string(path)?;
    let filter = FieldFilter::from_lines(&contents);
    if filter.is_empty() {
        return Err(AppError::InvalidCli(format!(
            "field list {} names no fields",
            path.display()
        )));
    }
    Ok(Some(filter))
}
