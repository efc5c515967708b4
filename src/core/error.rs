use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {status} {reason}")]
    Http { status: u16, reason: String },
    #[error("rate limit exhausted after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if let Some(status) = err.status() {
            ProbeError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            ProbeError::Network(err.to_string())
        }
    }
}
