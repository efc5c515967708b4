use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum spacing between outgoing requests.
#[derive(Debug, Default)]
pub struct RateLimiter {
    last: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last: None,
            min_interval,
        }
    }

    /// Sleep until the next request may go out, then claim the slot.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            tokio::time::sleep_until(last + self.min_interval).await;
        }
        self.last = Some(Instant::now());
    }
}
