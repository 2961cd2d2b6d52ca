use std::fmt;

use crate::error::CoreError;

/// A validated community (subreddit) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Community(String);

impl Community {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Community {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let trimmed = trimmed.strip_prefix("r/").unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(CoreError::InvalidCommunity("empty name".to_string()));
        }
        // Subreddit names: 2-21 chars of letters, digits, underscore.
        if trimmed.len() < 2 || trimmed.len() > 21 {
            return Err(CoreError::InvalidCommunity(trimmed.to_string()));
        }
        if !trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(CoreError::InvalidCommunity(trimmed.to_string()));
        }
        Ok(Community(trimmed.to_string()))
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
