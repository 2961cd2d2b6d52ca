mod client;

pub use client::{PushshiftClient, PushshiftError};
