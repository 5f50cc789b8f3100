//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Wordrush game server.
#[derive(Debug, Clone, Parser)]
#[command(name = "wordrush-server", version, about)]
pub struct Args {
    /// Socket address to listen on.
    #[arg(long, env = "WORDRUSH_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Path to the word/clue file (one `word<TAB>clue` per line).
    #[arg(long, env = "WORDRUSH_LEXICON", default_value = "clues.tsv")]
    pub lexicon: PathBuf,

    /// Origin allowed by CORS, or `*` for any.
    #[arg(long, env = "WORDRUSH_ALLOW_ORIGIN", default_value = "*")]
    pub allow_origin: String,
}
