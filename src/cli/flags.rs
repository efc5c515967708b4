use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "namehawk",
    version,
    about = "Check a wordlist of usernames for availability on a profile service"
)]
pub struct Cli {
    /// Path to config file (TOML). Default: config/namehawk.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wordlist file, one candidate per line
    #[arg(long)]
    pub wordlist: Option<PathBuf>,

    /// File that receives the available usernames
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Profile URL prefix the username is appended to
    #[arg(long)]
    pub base_url: Option<String>,

    /// Increase verbosity (debug, trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional log file path (appended to)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
