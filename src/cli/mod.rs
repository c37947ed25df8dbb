//! CLI argument definitions and parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "botparams",
    version,
    author = "neur0map",
    about = "Rank the query parameters a crawler requests in a web-server access log",
    long_about = "botparams scans an access log for GET requests made by one known crawler, \
                  collects the query-string parameters of those requests and writes a \
                  frequency-ranked summary to a CSV file, printing the top entries."
)]
pub struct Cli {
    /// Path to the access log file
    #[arg(value_name = "ACCESS_LOG")]
    pub access_log: PathBuf,

    /// Path to the output file (defaults to parameters.csv)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Crawler to analyze, by menu number or name (skips the interactive menu)
    #[arg(long, value_name = "N|NAME")]
    pub crawler: Option<String>,

    /// Number of rows to print to the console
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Config file path (defaults to ~/.config/botparams/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
