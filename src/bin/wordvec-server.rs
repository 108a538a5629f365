//! wordvec Server Binary
//!
//! Loads a vector file and serves distance/analogy queries over TCP.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wordvec::format::{load_with, DecoderConfig};
use wordvec::server::{Config, Server};

/// wordvec Server - word embedding similarity queries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Binary vector file
    #[arg(short, long, default_value = "vectors.bin")]
    vectors: PathBuf,

    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port number
    #[arg(short, long, default_value_t = 7878)]
    port: u16,

    /// Results per query when the request gives no limit
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Concurrent searches (0 = auto-detect based on CPU cores)
    #[arg(long, default_value_t = 0)]
    query_workers: usize,

    /// Fail to load if any vector has zero norm
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordvec=info".parse()?))
        .init();

    let args = Args::parse();

    info!("Loading vectors from {}", args.vectors.display());
    let decoder_config = DecoderConfig::default().with_reject_degenerate(args.strict);
    let path = args.vectors.clone();
    let table = tokio::task::spawn_blocking(move || load_with(path, decoder_config)).await??;

    let config = Config::default()
        .with_bind(&args.bind)
        .with_port(args.port)
        .with_default_limit(args.limit)
        .with_query_workers(args.query_workers);

    let server = Server::new(config, Arc::new(table));
    server.run().await?;

    Ok(())
}
