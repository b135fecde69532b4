//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use response_stream::client::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use response_stream::stream::DEFAULT_CHARSET;

/// Fetch a URL once, printing the body as text or saving it to a file.
#[derive(Parser, Debug)]
#[command(name = "fetch")]
#[command(author, version, about)]
pub struct Args {
    /// URL to request
    pub url: String,

    /// Write the raw body to this file instead of printing it as text
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Charset used to decode the body as text
    #[arg(long, default_value = DEFAULT_CHARSET)]
    pub charset: String,

    /// Connect timeout in seconds (1-300)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// Overall request timeout in seconds (1-86400)
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=86400))]
    pub timeout: u64,

    /// Print status, reason and locale as one JSON object on stderr
    #[arg(long)]
    pub json_meta: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
