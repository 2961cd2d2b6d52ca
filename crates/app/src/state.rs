use std::sync::Arc;

use reqwest::Client;

use crate::config::AppConfig;
use driftnet_infra::pushshift::PushshiftClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: Client,
    pub archive: PushshiftClient,
}
