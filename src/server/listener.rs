use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::files::RequestHandler;
use crate::http::connection::Connection;

/// Accepts connections until `shutdown` fires, then drops the listener.
///
/// Each connection runs on its own task and is left to finish after
/// shutdown.
pub async fn run(
    listener: TcpListener,
    handler: Arc<RequestHandler>,
    mut shutdown: oneshot::Receiver<()>,
) {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };
                debug!("Accepted connection from {}", peer);

                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    let mut conn = Connection::new(socket, handler);
                    if let Err(e) = conn.run().await {
                        warn!("Connection error from {}: {}", peer, e);
                    }
                });
            }

            _ = &mut shutdown => {
                break;
            }
        }
    }

    drop(listener);
    info!("Listener closed");
}
