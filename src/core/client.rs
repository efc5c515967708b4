use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, REFERER},
    Method, StatusCode,
};

use crate::{
    config::{AppConfig, RateLimitConfig},
    core::error::ProbeError,
};

#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ProbeRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// A single attempt; no retries at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ProbeRequest) -> Result<RawResponse, ProbeError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: &ProbeRequest) -> Result<RawResponse, ProbeError> {
        (**self).execute(request).await
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.headers.user_agent.clone())
            .default_headers(default_headers(config)?)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ProbeError::from)?;
        Ok(Self { client })
    }
}

fn default_headers(config: &AppConfig) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, header_value(&config.headers.referer)?);
    for (name, value) in &config.headers.extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ProbeError::Config(format!("header name {name}: {e}")))?;
        headers.insert(name, header_value(value)?);
    }
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, ProbeError> {
    HeaderValue::from_str(value).map_err(|e| ProbeError::Config(format!("header {value}: {e}")))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ProbeRequest) -> Result<RawResponse, ProbeError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub backoff: Duration,
    pub max_attempts: u32,
}

impl From<&RateLimitConfig> for RetryPolicy {
    fn from(cfg: &RateLimitConfig) -> Self {
        Self {
            backoff: cfg.backoff(),
            max_attempts: cfg.max_attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        (&RateLimitConfig::default()).into()
    }
}

/// Retries the identical request after a fixed pause on 429, up to
/// `max_attempts` in total. Any other status >= 400 is returned as an error.
pub struct RetryingClient<T: Transport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn get(&self, url: &str) -> Result<RawResponse, ProbeError> {
        self.request(&ProbeRequest::get(url)).await
    }

    pub async fn request(&self, request: &ProbeRequest) -> Result<RawResponse, ProbeError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let resp = match self.transport.execute(request).await {
                Ok(resp) => resp,
                Err(err) => {
                    tracing::error!("Request to {} failed: {}", request.url, err);
                    return Err(err);
                }
            };

            if resp.status < 400 {
                return Ok(resp);
            }

            if resp.status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
                if attempt >= self.policy.max_attempts {
                    tracing::error!(
                        "Rate limited on {}; giving up after {} attempts",
                        request.url,
                        attempt
                    );
                    return Err(ProbeError::RateLimitExhausted { attempts: attempt });
                }
                tracing::warn!(
                    "Rate limited. Sleeping for {} seconds!",
                    self.policy.backoff.as_secs_f64()
                );
                tokio::time::sleep(self.policy.backoff).await;
                continue;
            }

            let reason = reason_phrase(resp.status);
            tracing::error!("Bad request: {} {}", resp.status, reason);
            return Err(ProbeError::Http {
                status: resp.status,
                reason,
            });
        }
    }
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_string()
}
