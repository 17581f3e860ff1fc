//! The `snagsby` command line interface.
//!
//! Resolves the requested sources and prints the merged configuration to
//! stdout as shell exports or JSON. Diagnostics go to stderr so the output
//! stays safe to `eval`.

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use snagsby::formatters::{DEFAULT_FORMATTER, get_formatter};

/// Load configuration from remote sources and print it for the shell.
#[derive(Debug, Parser)]
#[command(name = "snagsby", version, disable_version_flag = true)]
struct Cli {
    /// Source URLs; multiple values are joined into one source list.
    /// Falls back to $SNAGSBY_SOURCE when omitted.
    source: Vec<String>,

    /// Output format (`env` or `json`).
    #[arg(short, long, default_value = DEFAULT_FORMATTER)]
    output: String,

    /// Print version information and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Joins the positional source arguments into one source-list string.
    fn source_list(&self) -> Option<String> {
        if self.source.is_empty() {
            None
        } else {
            Some(self.source.join(","))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data = snagsby::get(cli.source_list().as_deref()).await;
    let output = get_formatter(&cli.output, data)?.render()?;
    println!("{output}");

    Ok(())
}
