use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::flags::Cli;
use crate::config::{load_config, AppConfig};
use crate::core::client::{HttpTransport, Transport};
use crate::core::engine::Prober;
use crate::core::output::write_available;
use crate::core::wordlist::load_wordlist_or_empty;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub available: Vec<String>,
    pub taken: usize,
    pub skipped: usize,
    pub output_written: bool,
}

pub async fn run(cli: Cli) -> Result<RunSummary> {
    let cfg = resolve_config(&cli)?;
    let transport = HttpTransport::new(&cfg).context("building http client")?;
    Ok(run_check(&cfg, transport).await)
}

pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(path) = &cli.wordlist {
        cfg.wordlist = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &cli.output {
        cfg.output = path.to_string_lossy().into_owned();
    }
    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    Ok(cfg)
}

/// Load, probe and persist. Per-word and file failures are logged, never
/// returned.
pub async fn run_check<T: Transport>(cfg: &AppConfig, transport: T) -> RunSummary {
    println!("Reading username wordlist...");
    let words = load_wordlist_or_empty(Path::new(&cfg.wordlist));
    println!("Checking usernames...");
    let mut summary = RunSummary {
        loaded: words.len(),
        ..RunSummary::default()
    };
    if words.is_empty() {
        tracing::info!("No usernames to check");
        return summary;
    }

    println!("Found {} usernames to check...", words.len());
    println!("Checking {} usernames.", words.len());

    let prober = Prober::new(transport, cfg);
    let report = prober.run(&words).await;
    summary.available = report.available();
    summary.taken = report.taken_count();
    summary.skipped = report.skipped_count();

    let out_path = Path::new(&cfg.output);
    match write_available(&summary.available, out_path) {
        Ok(true) => {
            summary.output_written = true;
            println!("Available usernames saved to {}.", out_path.display());
        }
        Ok(false) => {}
        Err(err) => tracing::error!("Error writing to {}: {}", out_path.display(), err),
    }

    tracing::info!(
        "Done: {} available, {} taken, {} skipped",
        summary.available.len(),
        summary.taken,
        summary.skipped
    );
    summary
}
