mod collect;
mod refresh;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};
use crate::state::AppState;
use driftnet_core::types::{Community, FieldFilter, ResolvedRange};
use driftnet_infra::pushshift::PushshiftError;
use driftnet_infra::reddit::{RedditClient, RedditError};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("archive error: {0}")]
    Archive(#[from] PushshiftError),
    #[error("live api error: {0}")]
    Live(#[from] RedditError),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub pages: usize,
    pub fetched: usize,
    pub retained: usize,
    pub refreshed: usize,
}

/// Collect one community's posts for the window, optionally refresh volatile
/// fields from the live API, and write the output file. Strictly sequential;
/// any failure aborts the run with nothing written.
pub async fn run(
    state: &AppState,
    live: Option<&RedditClient>,
    community: &Community,
    range: &ResolvedRange,
    cap: Option<usize>,
    filter: Option<&FieldFilter>,
    output_dir: &Path,
) -> Result<RunStats, ScrapeError> {
    info!(
        community = %community,
        start = %range.start,
        end = %range.end,
        "collecting community"
    );
    let collected = collect::collect(state, community, range, cap).await?;
    let mut records = collected.records;

    let refreshed = match live {
        Some(client) => refresh::refresh(client, &mut records).await?,
        None => 0,
    };

    let path = output::output_path(output_dir, community, range);
    output::write_records(&path, &records, filter)?;
    let stats = RunStats {
        pages: collected.pages,
        fetched: collected.fetched,
        retained: records.len(),
        refreshed,
    };
    info!(
        community = %community,
        path = %path.display(),
        retained = stats.retained,
        "community archived"
    );
    Ok(stats)
}
