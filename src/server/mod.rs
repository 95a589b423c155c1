//! Listening socket and its lifecycle.

pub mod lifecycle;
pub mod listener;

pub use lifecycle::{LifecycleEvent, ServerError, ServerInfo, StaticServer};
