use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

const TOKEN_ENDPOINT: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_ENDPOINT: &str = "https://oauth.reddit.com";

/// The info endpoint accepts at most this many fullnames per request.
pub const INFO_CHUNK_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("authentication rejected: {0}")]
    AuthRejected(String),
}

/// Script-app credentials for the live platform API.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

/// A post as the live API sees it right now, used to refresh volatile fields
/// on archived records.
#[derive(Debug, Clone)]
pub struct LivePost {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// Authenticated client for the live platform API. Login is a one-shot OAuth2
/// password grant; a run is short enough that the token is never refreshed.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    user_agent: String,
    bearer_token: String,
}

impl RedditClient {
    pub async fn login(
        http: reqwest::Client,
        credentials: &RedditCredentials,
        user_agent: &str,
    ) -> Result<Self, RedditError> {
        let response = http
            .post(TOKEN_ENDPOINT)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header("User-Agent", user_agent)
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let bearer_token = parse_token_response(&body)?;
        Ok(Self {
            http,
            user_agent: user_agent.to_string(),
            bearer_token,
        })
    }

    /// Look up live submissions by fullname (`t3_…`). Deleted posts are
    /// simply absent from the result. Callers pass at most
    /// [`INFO_CHUNK_SIZE`] fullnames per call.
    pub async fn fetch_info(&self, fullnames: &[String]) -> Result<Vec<LivePost>, RedditError> {
        let url = format!("{OAUTH_ENDPOINT}/api/info");
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("bearer {}", self.bearer_token))
            .header("User-Agent", self.user_agent.as_str())
            .query(&[("id", fullnames.join(",")), ("raw_json", "1".to_string())])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        parse_info_response(&body)
    }
}

/// The token endpoint reports bad credentials as a 200 with an `error` key,
/// so a status check alone is not enough.
fn parse_token_response(body: &str) -> Result<String, RedditError> {
    let payload: TokenResponse = serde_json::from_str(body)
        .map_err(|_| RedditError::InvalidResponse(format!("invalid token payload: {body}")))?;
    if let Some(error) = payload.error {
        return Err(RedditError::AuthRejected(error));
    }
    match payload.access_token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(RedditError::InvalidResponse(
            "missing access token".to_string(),
        )),
    }
}

fn parse_info_response(body: &str) -> Result<Vec<LivePost>, RedditError> {
    let listing: InfoListing = serde_json::from_str(body)
        .map_err(|err| RedditError::InvalidResponse(err.to_string()))?;
    let mut posts = Vec::with_capacity(listing.data.children.len());
    for child in listing.data.children {
        if child.kind != "t3" {
            continue;
        }
        let Some(Value::String(id)) = child.data.get("id") else {
            return Err(RedditError::InvalidResponse(
                "live post without id".to_string(),
            ));
        };
        posts.push(LivePost {
            id: id.clone(),
            fields: child.data,
        });
    }
    Ok(posts)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfoListing {
    data: InfoListingData,
}

#[derive(Debug, Deserialize)]
struct InfoListingData {
    children: Vec<InfoChild>,
}

#[derive(Debug, Deserialize)]
struct InfoChild {
    kind: String,
    data: Map<String, Value>,
}
