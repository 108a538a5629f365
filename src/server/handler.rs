//! Connection Handler
//!
//! Reads request lines, runs queries on the blocking pool and writes the
//! response lines back.

use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Semaphore;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::debug;

use super::command::{Command, Response};
use super::config::Config;
use crate::metrics::Metrics;
use crate::query;
use crate::vector::VectorTable;

/// Per-connection handler
pub struct Handler {
    table: Arc<VectorTable>,
    config: Arc<Config>,
    metrics: Arc<Metrics>,
    permits: Arc<Semaphore>,
}

impl Handler {
    /// Create a new handler
    pub fn new(
        table: Arc<VectorTable>,
        config: Arc<Config>,
        metrics: Arc<Metrics>,
        permits: Arc<Semaphore>,
    ) -> Self {
        Self {
            table,
            config,
            metrics,
            permits,
        }
    }

    /// Run the handler until the peer disconnects
    pub async fn run<T>(self, mut framed: Framed<T, LinesCodec>) -> Result<(), LinesCodecError>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        while let Some(line) = framed.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let start = Instant::now();

            let (name, response) = match Command::parse(&line) {
                Ok(cmd) => (cmd.name(), self.execute(cmd).await),
                Err(e) => ("INVALID", Response::from(e)),
            };

            let elapsed = start.elapsed();
            if matches!(response, Response::Error(_)) {
                self.metrics.record_error();
            }
            self.metrics.record_operation(name, elapsed);
            debug!(cmd = %name, latency = ?elapsed, "Command executed");

            framed.send(response.to_lines().join("\n")).await?;
        }

        Ok(())
    }

    /// Execute a command and return response
    pub async fn execute(&self, cmd: Command) -> Response {
        match cmd {
            Command::Ping => Response::Pong,

            Command::Stats => Response::Stats(format!(
                "words={} dimension={} {}",
                self.table.len(),
                self.table.dimension(),
                self.metrics.summary()
            )),

            Command::Distance { word, limit } => {
                let limit = self.config.resolve_limit(limit);
                self.run_query(move |table| query::distance(table, &word, limit))
                    .await
            }

            Command::Analogy {
                word1,
                word2,
                word3,
                limit,
            } => {
                let limit = self.config.resolve_limit(limit);
                self.run_query(move |table| query::analogy(table, &word1, &word2, &word3, limit))
                    .await
            }
        }
    }

    /// Run a search on the blocking pool, bounded by the query permits
    async fn run_query<F>(&self, f: F) -> Response
    where
        F: FnOnce(&VectorTable) -> crate::error::Result<Vec<crate::vector::WordDistance>>
            + Send
            + 'static,
    {
        let Ok(_permit) = self.permits.clone().acquire_owned().await else {
            return Response::Error("server shutting down".to_string());
        };

        let table = self.table.clone();
        match tokio::task::spawn_blocking(move || f(&table)).await {
            Ok(Ok(results)) => Response::Results(results),
            Ok(Err(e)) => Response::from(e),
            Err(e) => Response::Error(format!("query task failed: {}", e)),
        }
    }
}
