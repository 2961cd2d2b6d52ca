use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use driftnet_infra::pushshift::PushshiftClient;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    let archive = PushshiftClient::new(
        client.clone(),
        config.archive_base_url.clone(),
        config.page_size,
    );
    Ok(AppState {
        config: Arc::new(config),
        http_client: client,
        archive,
    })
}
