//! Static file serving
//!
//! This module turns request paths into file content: resolving paths under
//! the root directory, loading and typing files, and falling back to the
//! not-found page when a lookup fails.

pub mod handler;
pub mod loader;
pub mod resolver;

pub use handler::{DEFAULT_NOT_FOUND_MESSAGE, RequestHandler};
pub use loader::{Content, ContentLoader, ReadError};
pub use resolver::PathResolver;
