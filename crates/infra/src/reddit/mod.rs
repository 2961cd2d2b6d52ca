mod client;

pub use client::{INFO_CHUNK_SIZE, LivePost, RedditClient, RedditCredentials, RedditError};
