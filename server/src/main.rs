use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_app, build_index, load_articles};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Articles input: a JSON/JSONL file or a directory of them
    #[arg(long, default_value = "./sample_data/articles.jsonl")]
    input: PathBuf,
    /// Optional stop-words file (one word per line)
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let docs = load_articles(&args.input)?;
    tracing::info!(docs = docs.len(), input = %args.input.display(), "articles loaded");
    let index = build_index(&docs, args.stop_words.as_deref())?;
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
