use serde::{Deserialize, Serialize};
use thiserror::Error;

use driftnet_core::domain::PostRecord;
use driftnet_core::types::Community;

const SUBMISSION_SEARCH_PATH: &str = "/reddit/search/submission";

#[derive(Debug, Error)]
pub enum PushshiftError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for the archive API's submission-search endpoint. Pagination is a
/// descending `created_utc` cursor: the caller passes the previous page's
/// oldest timestamp as `before`.
#[derive(Debug, Clone)]
pub struct PushshiftClient {
    http: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl PushshiftClient {
    pub fn new(http: reqwest::Client, base_url: String, page_size: usize) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            page_size,
        }
    }

    /// Fetch one page of submissions for `community`, newest first, with
    /// creation times strictly inside `(after, before)`.
    pub async fn fetch_page(
        &self,
        community: &Community,
        before: i64,
        after: i64,
    ) -> Result<Vec<PostRecord>, PushshiftError> {
        let url = format!("{}{SUBMISSION_SEARCH_PATH}", self.base_url);
        let query = SearchQuery {
            subreddit: community.as_str(),
            sort: "desc",
            sort_type: "created_utc",
            size: self.page_size,
            before,
            after,
        };
        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        parse_page(&body)
    }
}

fn parse_page(body: &str) -> Result<Vec<PostRecord>, PushshiftError> {
    let envelope: SearchResponse = serde_json::from_str(body)
        .map_err(|err| PushshiftError::InvalidResponse(err.to_string()))?;
    Ok(envelope.data)
}

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    subreddit: &'a str,
    sort: &'a str,
    sort_type: &'a str,
    size: usize,
    before: i64,
    after: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<PostRecord>,
}
