//! Shared HTTP client construction for the outbound API clients

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

pub const USER_AGENT: &str = concat!("WanderWise/", env!("CARGO_PKG_VERSION"));

/// Build a client with the given timeout; transient failures are retried only
/// when `max_retries > 0`
pub fn build_client(timeout_seconds: u32, max_retries: u32) -> Result<ClientWithMiddleware> {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .build()
        .context("failed to build an HTTP client")?;

    let mut builder = ClientBuilder::new(client);
    if max_retries > 0 {
        let policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
    }
    Ok(builder.build())
}
