use crossterm::style::Stylize;

use crate::{
    config::AppConfig,
    core::{
        client::{RetryPolicy, RetryingClient, Transport},
        error::ProbeError,
    },
    modules::recon::username::{classify_body, profile_url, Availability},
    sources::rate_limiter::RateLimiter,
};

#[derive(Debug)]
pub enum ProbeOutcome {
    Available,
    Taken,
    /// The request failed; the word counts as neither available nor taken.
    Skipped(ProbeError),
}

impl From<Availability> for ProbeOutcome {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Available => ProbeOutcome::Available,
            Availability::Taken => ProbeOutcome::Taken,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProbeReport {
    /// One entry per probed word, in wordlist order.
    pub outcomes: Vec<(String, ProbeOutcome)>,
}

impl ProbeReport {
    pub fn available(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ProbeOutcome::Available))
            .map(|(word, _)| word.clone())
            .collect()
    }

    pub fn taken_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ProbeOutcome::Taken))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ProbeOutcome::Skipped(_)))
            .count()
    }
}

pub struct Prober<T: Transport> {
    client: RetryingClient<T>,
    base_url: String,
    marker: String,
    min_interval: std::time::Duration,
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            client: RetryingClient::new(transport, RetryPolicy::from(&config.rate_limit)),
            base_url: config.base_url.clone(),
            marker: config.marker.clone(),
            min_interval: config.rate_limit.min_interval(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.client = self.client.with_policy(policy);
        self
    }

    pub async fn probe(&self, word: &str) -> ProbeOutcome {
        let url = profile_url(&self.base_url, word);
        match self.client.get(&url).await {
            Ok(resp) => classify_body(&resp.body, &self.marker).into(),
            Err(err) => ProbeOutcome::Skipped(err),
        }
    }

    /// Probe every word strictly in order, printing a status line for each
    /// word that got a response.
    pub async fn run(&self, words: &[String]) -> ProbeReport {
        let mut limiter = RateLimiter::new(self.min_interval);
        let mut report = ProbeReport::default();

        for word in words {
            limiter.wait().await;
            let outcome = self.probe(word).await;
            match render_outcome(word, &outcome) {
                Some(line) => println!("{line}"),
                None => tracing::debug!("skipped {}", word),
            }
            report.outcomes.push((word.clone(), outcome));
        }

        report
    }
}

/// Console line for a probed word; skipped words get none.
pub fn render_outcome(word: &str, outcome: &ProbeOutcome) -> Option<String> {
    match outcome {
        ProbeOutcome::Available => Some(format!(
            "Username {}!",
            format!("{word} is available").green()
        )),
        ProbeOutcome::Taken => Some(format!(
            "Username {}!",
            format!("{word} is not available").red()
        )),
        ProbeOutcome::Skipped(_) => None,
    }
}
