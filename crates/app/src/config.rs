use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use driftnet_infra::reddit::RedditCredentials;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub archive_base_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub reddit: Option<RedditCredentials>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("incomplete reddit credentials: {0} is missing")]
    IncompleteCredentials(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let archive_base_url =
            read_string("DRIFTNET_ARCHIVE_BASE_URL", "https://api.pushshift.io");
        if archive_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "DRIFTNET_ARCHIVE_BASE_URL",
                archive_base_url,
            ));
        }
        let page_size = read_usize("DRIFTNET_PAGE_SIZE", 500)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "DRIFTNET_PAGE_SIZE",
                page_size.to_string(),
            ));
        }
        let request_timeout_secs = read_u64("DRIFTNET_REQUEST_TIMEOUT_SECS", 30)?;
        let user_agent = read_string(
            "DRIFTNET_USER_AGENT",
            "driftnet:v0.1.0 (chronological community archiver)",
        );
        let reddit = read_reddit_credentials()?;

        Ok(Self {
            archive_base_url,
            page_size,
            request_timeout: Duration::from_secs(request_timeout_secs),
            user_agent,
            reddit,
        })
    }
}

/// The live API credentials are all-or-nothing: a partial set is almost
/// certainly a typo'd variable name, so it fails loudly.
fn read_reddit_credentials() -> Result<Option<RedditCredentials>, ConfigError> {
    let client_id = read_optional_string("DRIFTNET_REDDIT_CLIENT_ID");
    let client_secret = read_optional_string("DRIFTNET_REDDIT_CLIENT_SECRET");
    let username = read_optional_string("DRIFTNET_REDDIT_USERNAME");
    let password = read_optional_string("DRIFTNET_REDDIT_PASSWORD");

    match (client_id, client_secret, username, password) {
        (None, None, None, None) => Ok(None),
        (Some(client_id), Some(client_secret), Some(username), Some(password)) => {
            Ok(Some(RedditCredentials {
                client_id,
                client_secret,
                username,
                password,
            }))
        }
        (None, ..) => Err(ConfigError::IncompleteCredentials("DRIFTNET_REDDIT_CLIENT_ID")),
        (_, None, ..) => Err(ConfigError::IncompleteCredentials(
            "DRIFTNET_REDDIT_CLIENT_SECRET",
        )),
        (_, _, None, _) => Err(ConfigError::IncompleteCredentials(
            "DRIFTNET_REDDIT_USERNAME",
        )),
        (_, _, _, None) => Err(ConfigError::IncompleteCredentials(
            "DRIFTNET_REDDIT_PASSWORD",
        )),
    }
}

pub fn load_dotenv() -> Result<(), std::io::Error> {
    let path = Path::new(".env");
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(path)?;
    for line in contents.lines() {
        let Some((key, value)) = parse_dotenv_line(line) else {
            continue;
        };
        if std::env::var_os(&key).is_none() {
            // Safety: invoked during startup before any threads are spawned.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
    Ok(())
}

fn read_string(key: &'static str, default: &'static str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn read_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_usize(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_optional_string(key: &'static str) -> Option<String> {
    let value = std::env::var(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_dotenv_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), parse_dotenv_value(value.trim())))
}

fn parse_dotenv_value(value: &str) -> String {
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return unescape_double_quoted(inner);
    }
    if let Some(inner) = value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return inner.to_string();
    }
    value.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('\\') => output.push('\\'),
            Some('"') => output.push('"'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::parse_dotenv_line;

    #[test]
    fn parse_dotenv_line_basic() {
        let (key, value) = parse_dotenv_line("DRIFTNET_PAGE_SIZE=250").unwrap();
        assert_eq!(key, "DRIFTNET_PAGE_SIZE");
        assert_eq!(value, "250");
    }

    #[test]
    fn parse_dotenv_line_export_and_quotes() {
        let (key, value) =
            parse_dotenv_line(r#"export DRIFTNET_USER_AGENT="driftnet v0.1""#).unwrap();
        assert_eq!(key, "DRIFTNET_USER_AGENT");
        assert_eq!(value, "driftnet v0.1");

        let (_, value) = parse_dotenv_line("DRIFTNET_REDDIT_PASSWORD='hunter two'").unwrap();
        assert_eq!(value, "hunter two");
    }

    #[test]
    fn parse_dotenv_line_escapes() {
        let (_, value) = parse_dotenv_line(r#"KEY="line\n\"quoted\"""#).unwrap();
        assert_eq!(value, "line\n\"quoted\"");
    }

    #[test]
    fn parse_dotenv_line_skips_comments_and_blanks() {
        assert!(parse_dotenv_line("# comment").is_none());
        assert!(parse_dotenv_line("   ").is_none());
        assert!(parse_dotenv_line("=no_key").is_none());
    }
}
