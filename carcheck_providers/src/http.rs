use std::time::Duration;

use anyhow::Context;
use carcheck_core::ProviderError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("carcheck/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept for logs.
const MAX_ERROR_BODY: usize = 512;

/// Shared HTTP client for every adapter.
pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Maps a transport error without its URL, which can carry API keys in the
/// query string.
pub fn request_error(e: reqwest::Error) -> ProviderError {
    let e = e.without_url();
    if e.is_decode() {
        ProviderError::Decode(e.to_string())
    } else {
        ProviderError::Http(e.to_string())
    }
}

/// Turns a non-success response into a `Status` error, keeping the head of
/// the body for diagnostics.
pub async fn status_error(response: Response) -> ProviderError {
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    ProviderError::Status { status, body }
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let bytes = response.bytes().await.map_err(request_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
}
