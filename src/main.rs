//! CLI entry point for the fetch tool.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use response_stream::{ClientConfig, HttpClient};
use tracing::{debug, info};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = ClientConfig::default()
        .with_timeouts(args.connect_timeout, args.timeout)
        .with_charset(args.charset.as_str());
    let client = HttpClient::with_config(config)?;

    let mut stream = client.send(&args.url)?;
    info!(
        status = stream.status_code(),
        reason = %stream.reason_phrase(),
        locale = ?stream.locale().map(ToString::to_string),
        "response received"
    );

    if args.json_meta {
        let meta = serde_json::to_string(stream.meta()).context("failed to encode metadata")?;
        eprintln!("{meta}");
    }

    match &args.output {
        Some(path) => {
            stream.read_to_file(path)?;
            info!(path = %path.display(), "body saved");
        }
        None => {
            let text = stream.read_as_text()?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
