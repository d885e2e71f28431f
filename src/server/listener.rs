use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(cfg.address()).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accepts connections forever, one task per connection.
///
/// The loop only ever waits on `accept`; handlers run on their own tasks and
/// share nothing but the read-only configuration.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let cfg = Arc::clone(&cfg);
        tokio::spawn(async move {
            if let Err(e) = handle_stream(socket, cfg).await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = bind(&cfg).await?;
    serve(listener, cfg).await
}

async fn handle_stream(socket: TcpStream, cfg: Arc<Config>) -> anyhow::Result<()> {
    let (reader, writer) = socket.into_split();
    Connection::new(reader, writer, cfg).run().await
}
