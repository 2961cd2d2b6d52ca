use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
    #[error("invalid community name: {0}")]
    InvalidCommunity(String),
}
