use clap::Parser;
use wordrush_server::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordrush=info,tower_http=info".into()),
        )
        .init();

    wordrush_server::run(Args::parse()).await
}
