//! Server Module
//!
//! TCP query server over a shared, read-only [`VectorTable`]. Each connection
//! speaks the line protocol in [`command`]; searches run on Tokio's blocking
//! pool, at most [`Config::query_workers`] at a time.

mod command;
mod config;
mod handler;

pub use command::{Command, Response};
pub use config::Config;
pub use handler::Handler;

use crate::metrics::Metrics;
use crate::vector::VectorTable;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{error, info};

/// Query server
pub struct Server {
    config: Arc<Config>,
    table: Arc<VectorTable>,
    metrics: Arc<Metrics>,
    permits: Arc<Semaphore>,
}

impl Server {
    /// Create a new server over a loaded table
    pub fn new(config: Config, table: Arc<VectorTable>) -> Self {
        let permits = Arc::new(Semaphore::new(config.effective_query_workers()));
        Self {
            config: Arc::new(config),
            table,
            metrics: Arc::new(Metrics::new()),
            permits,
        }
    }

    /// Bind the configured address and serve forever
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.addr()).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        info!(
            "wordvec server listening on {} ({} words, dimension {}, {} query workers)",
            listener.local_addr()?,
            self.table.len(),
            self.table.dimension(),
            self.config.effective_query_workers()
        );

        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    info!("New connection from {}", peer_addr);

                    let handler = Handler::new(
                        self.table.clone(),
                        self.config.clone(),
                        self.metrics.clone(),
                        self.permits.clone(),
                    );
                    let codec = LinesCodec::new_with_max_length(self.config.max_line_length);

                    tokio::spawn(async move {
                        let framed = Framed::new(socket, codec);
                        if let Err(e) = handler.run(framed).await {
                            error!("Connection error from {}: {}", peer_addr, e);
                        }

                        info!("Connection closed: {}", peer_addr);
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }

    /// Get the served table
    pub fn table(&self) -> &Arc<VectorTable> {
        &self.table
    }

    /// Get metrics reference
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{SinkExt, StreamExt};
    use tokio::net::TcpStream;

    fn animals() -> Arc<VectorTable> {
        let mut builder = VectorTable::builder(2);
        builder.insert("cat", vec![0.6, 0.8]).unwrap();
        builder.insert("dog", vec![0.8, 0.6]).unwrap();
        builder.insert("fish", vec![1.0, 0.0]).unwrap();
        Arc::new(builder.build())
    }

    async fn next_line(framed: &mut Framed<TcpStream, LinesCodec>) -> String {
        framed.next().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_tcp_roundtrip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(Config::default().with_query_workers(2), animals());
        let metrics = server.metrics().clone();
        tokio::spawn(server.serve(listener));

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut framed = Framed::new(stream, LinesCodec::new());

        framed.send("PING").await.unwrap();
        assert_eq!(next_line(&mut framed).await, "PONG");

        framed.send("DISTANCE cat 2").await.unwrap();
        assert_eq!(next_line(&mut framed).await, "OK 2");
        assert!(next_line(&mut framed).await.starts_with("dog 0.96"));
        assert!(next_line(&mut framed).await.starts_with("fish 0.6"));

        framed.send("DISTANCE bird").await.unwrap();
        assert_eq!(next_line(&mut framed).await, "ERR Unknown word: bird");

        framed.send("JUMP").await.unwrap();
        assert!(next_line(&mut framed).await.starts_with("ERR Protocol error"));

        assert_eq!(metrics.total_ops(), 4);
        assert_eq!(metrics.errors(), 2);
    }
}
