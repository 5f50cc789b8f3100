//! HTTP + WebSocket front end for Wordrush.
//!
//! Wires the pieces together: loads the lexicon, owns the process-wide
//! [`RoomRegistry`](wordrush_room::RoomRegistry), and serves the REST
//! endpoints and WebSocket upgrades that connect browsers to rooms.

use std::sync::Arc;

use anyhow::Context;
use wordrush_lexicon::Lexicon;
use wordrush_room::RoomRegistry;

pub mod codegen;
pub mod config;
mod connection;
mod routes;

pub use config::Args;
pub use routes::router;

/// Loads the lexicon and serves until the process is stopped.
///
/// # Errors
/// Fails fast on an unreadable or empty lexicon, an invalid CORS
/// origin, or an unbindable address.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let lexicon = Lexicon::load(&args.lexicon)
        .with_context(|| format!("loading lexicon from {}", args.lexicon.display()))?;
    tracing::info!(
        path = %args.lexicon.display(),
        entries = lexicon.len(),
        "lexicon ready"
    );

    let rooms = RoomRegistry::new(Arc::new(lexicon));
    let app = router(rooms, &args.allow_origin)?;

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(addr = %args.bind, "listening");

    axum::serve(listener, app).await.context("server error")
}
