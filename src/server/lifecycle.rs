//! Start/stop of the listening socket
//!
//! [`StaticServer`] owns the listener task. Observers subscribe to
//! [`LifecycleEvent`]s through a broadcast channel; `start` and `stop` also
//! return the same [`ServerInfo`] directly.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::config::{Protocol, ServerConfig};
use crate::files::RequestHandler;
use crate::server::listener;

/// Capacity of the lifecycle event channel
const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server is already running")]
    AlreadyRunning,
    #[error("server is not running")]
    NotRunning,
    #[error("listener task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Where the server is reachable and a human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// `protocol://host:port`
    pub origin: String,
    pub message: String,
    /// Address the socket is actually bound to
    pub local_addr: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start(ServerInfo),
    Stop(ServerInfo),
}

struct Running {
    origin: String,
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Static file server bound to one configuration.
pub struct StaticServer {
    config: Arc<ServerConfig>,
    handler: Arc<RequestHandler>,
    events: broadcast::Sender<LifecycleEvent>,
    running: Mutex<Option<Running>>,
}

impl StaticServer {
    pub fn new(config: ServerConfig) -> Self {
        let handler = Arc::new(RequestHandler::from_config(&config));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            config: Arc::new(config),
            handler,
            events,
            running: Mutex::new(None),
        }
    }

    /// Registers a lifecycle observer.
    ///
    /// Only events emitted after the call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events.subscribe()
    }

    /// Bound address while running.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().await.as_ref().map(|r| r.local_addr)
    }

    /// Binds `host:port` and starts accepting connections.
    pub async fn start(&self) -> Result<ServerInfo, ServerError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(ServerError::AlreadyRunning);
        }

        let addr = self.config.listen_addr();
        let bind_error = |source| ServerError::Bind {
            addr: addr.clone(),
            source,
        };

        let listener = TcpListener::bind(&addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        if self.config.protocol() == Protocol::Https {
            tracing::warn!("https origin configured; TLS must be terminated in front of this server");
        }

        let origin = format!(
            "{}://{}:{}",
            self.config.protocol(),
            self.config.host(),
            local_addr.port()
        );

        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(listener::run(
            listener,
            Arc::clone(&self.handler),
            shutdown_rx,
        ));

        *running = Some(Running {
            origin: origin.clone(),
            local_addr,
            shutdown,
            task,
        });

        let info = ServerInfo {
            message: format!("Server started on {origin}"),
            origin,
            local_addr,
        };
        tracing::info!(origin = %info.origin, "{}", info.message);
        let _ = self.events.send(LifecycleEvent::Start(info.clone()));

        Ok(info)
    }

    /// Stops accepting connections and closes the listening socket.
    pub async fn stop(&self) -> Result<ServerInfo, ServerError> {
        let Running {
            origin,
            local_addr,
            shutdown,
            task,
        } = self
            .running
            .lock()
            .await
            .take()
            .ok_or(ServerError::NotRunning)?;

        // The loop may already be gone if its task panicked
        let _ = shutdown.send(());
        task.await?;

        let info = ServerInfo {
            message: format!("Server on {origin} stopped"),
            origin,
            local_addr,
        };
        tracing::info!(origin = %info.origin, "{}", info.message);
        let _ = self.events.send(LifecycleEvent::Stop(info.clone()));

        Ok(info)
    }
}
