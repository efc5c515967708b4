use std::{fs, path::Path, process::ExitCode, sync::Mutex};

use clap::Parser;
use namehawk::cli::{commands, flags::Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BANNER: &str = r"
 _ __   __ _ _ __ ___   ___| |__   __ ___      _| | __
| '_ \ / _` | '_ ` _ \ / _ \ '_ \ / _` \ \ /\ / / |/ /
| | | | (_| | | | | | |  __/ | | | (_| |\ V  V /|   <
|_| |_|\__,_|_| |_| |_|\___|_| |_|\__,_| \_/\_/ |_|\_\
";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(&cli) {
        eprintln!("failed to initialise logging: {err:#}");
        return ExitCode::FAILURE;
    }

    println!("{BANNER}");
    match commands::run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);

    let file_layer = match &cli.log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(log_path))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;
    Ok(())
}
