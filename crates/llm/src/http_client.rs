//! HTTP Client Factory
//!
//! Builds the reqwest client shared by providers, with optional proxy and
//! request timeout.

use std::time::Duration;

use crate::types::{LlmError, LlmResult};

/// Build a `reqwest::Client`.
///
/// - `proxy: Some(url)` -> route every request through the proxy
/// - `proxy: None` -> explicitly disable proxying, ignoring env vars
/// - `timeout: Some(d)` -> whole-request timeout
pub fn build_http_client(
    proxy: Option<&str>,
    timeout: Option<Duration>,
) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent("mock-interview/0.1");

    match proxy {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url).map_err(|e| LlmError::InvalidRequest {
                message: format!("invalid proxy URL {}: {}", url, e),
            })?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| LlmError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}
