//! HTTP API over the in-memory store and the ingestion pipeline.

pub mod error;
pub mod handlers;
pub mod receipt;
pub mod router;
pub mod store;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use error::ApiError;
use store::TransactionStore;

pub use router::create_router;

/// Shared handler state. The store is owned here and handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<TransactionStore>,
    pub default_bank: String,
    pub max_upload_bytes: usize,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(store: Arc<TransactionStore>, config: &Config) -> Self {
        Self {
            store,
            default_bank: config.import.default_bank.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
            static_dir: config.server.static_dir.clone(),
        }
    }

    pub(crate) fn check_size(&self, size: usize) -> error::Result<()> {
        if size > self.max_upload_bytes {
            return Err(ApiError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}

/// Run the API server
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
