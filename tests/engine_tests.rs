use std::time::Duration;

use httpmock::prelude::*;
use namehawk::cli::commands::run_check;
use namehawk::config::{AppConfig, DEFAULT_MARKER};
use namehawk::core::client::{HttpTransport, RetryPolicy};
use namehawk::core::engine::{ProbeOutcome, Prober};
use namehawk::core::error::ProbeError;

fn mock_config(server: &MockServer) -> AppConfig {
    AppConfig {
        base_url: format!("{}/id/", server.base_url()),
        timeout_ms: 2000,
        ..AppConfig::default()
    }
}

fn not_found_page() -> String {
    format!("<html><body><h3>{DEFAULT_MARKER}</h3></body></html>")
}

#[tokio::test]
async fn prober_classifies_by_marker() {
    let server = MockServer::start();
    let free = server.mock(|when, then| {
        when.method(GET).path("/id/freebird");
        then.status(200).body(not_found_page());
    });
    let taken = server.mock(|when, then| {
        when.method(GET).path("/id/gaben");
        then.status(200).body("<html>gaben's profile</html>");
    });

    let cfg = mock_config(&server);
    let prober = Prober::new(HttpTransport::new(&cfg).unwrap(), &cfg);
    let words = vec!["freebird".to_string(), "gaben".to_string()];
    let report = prober.run(&words).await;

    free.assert();
    taken.assert();
    assert_eq!(report.available(), vec!["freebird"]);
    assert_eq!(report.taken_count(), 1);
    assert_eq!(report.skipped_count(), 0);
}

#[tokio::test]
async fn browser_headers_are_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/id/someone")
            .header("referer", "https://store.steampowered.com/")
            .header("dnt", "1")
            .header_exists("user-agent");
        then.status(200).body("profile");
    });

    let cfg = mock_config(&server);
    let prober = Prober::new(HttpTransport::new(&cfg).unwrap(), &cfg);
    let outcome = prober.probe("someone").await;

    mock.assert();
    assert!(matches!(outcome, ProbeOutcome::Taken));
}

#[tokio::test]
async fn server_error_word_is_skipped_and_left_out_of_output() {
    let server = MockServer::start();
    let broken = server.mock(|when, then| {
        when.method(GET).path("/id/broken");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/id/alpha");
        then.status(200).body(not_found_page());
    });
    server.mock(|when, then| {
        when.method(GET).path("/id/omega");
        then.status(200).body(not_found_page());
    });

    let dir = std::env::temp_dir().join("namehawk_skip_on_error");
    std::fs::create_dir_all(&dir).unwrap();
    let wordlist = dir.join("words.txt");
    let output = dir.join("available_words.txt");
    std::fs::write(&wordlist, "omega\nbroken\nalpha\n").unwrap();
    let _ = std::fs::remove_file(&output);

    let cfg = AppConfig {
        wordlist: wordlist.to_string_lossy().into_owned(),
        output: output.to_string_lossy().into_owned(),
        ..mock_config(&server)
    };
    let summary = run_check(&cfg, HttpTransport::new(&cfg).unwrap()).await;

    broken.assert_hits(1);
    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.available, vec!["alpha", "omega"]);
    assert_eq!(summary.skipped, 1);
    assert!(summary.output_written);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "alpha\nomega");
}

#[tokio::test]
async fn sustained_rate_limit_gives_up_after_max_attempts() {
    let server = MockServer::start();
    let limited = server.mock(|when, then| {
        when.method(GET).path("/id/busy");
        then.status(429);
    });

    let cfg = mock_config(&server);
    let prober = Prober::new(HttpTransport::new(&cfg).unwrap(), &cfg).with_policy(RetryPolicy {
        backoff: Duration::from_millis(20),
        max_attempts: 3,
    });
    let outcome = prober.probe("busy").await;

    limited.assert_hits(3);
    assert!(matches!(
        outcome,
        ProbeOutcome::Skipped(ProbeError::RateLimitExhausted { attempts: 3 })
    ));
}

#[tokio::test]
async fn unreachable_host_is_skipped() {
    let cfg = AppConfig {
        base_url: "http://127.0.0.1:1/id/".to_string(),
        timeout_ms: 500,
        ..AppConfig::default()
    };
    let prober = Prober::new(HttpTransport::new(&cfg).unwrap(), &cfg);
    let outcome = prober.probe("nobody").await;
    assert!(matches!(outcome, ProbeOutcome::Skipped(_)));
}
