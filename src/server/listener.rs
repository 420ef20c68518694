use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::{ConnectionSettings, handle};
use crate::http::handler::StaticHandler;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(
        "Listening on {} (root {}, max {} connections)",
        listener.local_addr()?,
        cfg.root.display(),
        cfg.max_connections
    );

    serve(listener, cfg).await
}

/// Accepts connections forever, handing each to its own task.
///
/// A permit is taken before accepting, so at most `max_connections` requests
/// are in flight and further clients wait in the listen backlog.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let limit = Arc::new(Semaphore::new(cfg.max_connections));
    let handler = Arc::new(StaticHandler::new(cfg.root.clone()));
    let settings = ConnectionSettings::from(cfg);

    loop {
        let permit = limit
            .clone()
            .acquire_owned()
            .await
            .context("connection limiter closed")?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        tracing::debug!(%peer, available = limit.available_permits(), "Accepted connection");

        let handler = handler.clone();
        tokio::spawn(
            async move {
                handle(socket, handler, settings).await;
                drop(permit);
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
