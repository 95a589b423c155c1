//! Static File Server
//!
//! Serves files from a root directory over HTTP, falling back to an index
//! file for the bare path and to a configurable not-found page.

pub mod config;
pub mod files;
pub mod http;
pub mod server;

pub use config::{ConfigError, Protocol, ServerConfig};
pub use server::{LifecycleEvent, ServerError, ServerInfo, StaticServer};
