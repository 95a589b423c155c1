//! Server configuration.
//!
//! A [`ServerConfig`] is assembled through [`ServerConfigBuilder`], either
//! directly or from a YAML file, and is immutable afterwards.
//!
//! ```yaml
//! protocol: http
//! host: 127.0.0.1
//! port: 3030
//! root_dir: ./public
//! index_file: index.html
//! not_found_file: 404.html
//! mime_types:
//!   md: text/markdown
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::http::mime::MimeRegistry;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Errors raised while building a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported protocol `{0}`, expected `http` or `https`")]
    UnsupportedProtocol(String),
    #[error("root_dir is required")]
    MissingRootDir,
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Scheme the server advertises in its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// Parses a protocol name (`"http"` or `"https"`, exact match).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(ConfigError::UnsupportedProtocol(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated configuration of a static server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    protocol: Protocol,
    host: String,
    port: u16,
    root_dir: String,
    index_file: String,
    not_found_file: Option<String>,
    mime_types: MimeRegistry,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Parses a YAML document and validates it.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(source)?;
        file.into_builder().build()
    }

    /// Reads and validates a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub fn not_found_file(&self) -> Option<&str> {
        self.not_found_file.as_deref()
    }

    pub fn mime_types(&self) -> &MimeRegistry {
        &self.mime_types
    }

    /// `protocol://host:port` as configured.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    /// `host:port` pair handed to the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fluent builder for [`ServerConfig`].
///
/// Validation happens in [`build`](ServerConfigBuilder::build), so an
/// invalid protocol or a missing root directory never yields a config.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    root_dir: Option<String>,
    index_file: Option<String>,
    not_found_file: Option<String>,
    mime_types: HashMap<String, String>,
}

impl ServerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn root_dir(mut self, root_dir: impl Into<String>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = Some(index_file.into());
        self
    }

    pub fn not_found_file(mut self, not_found_file: impl Into<String>) -> Self {
        self.not_found_file = Some(not_found_file.into());
        self
    }

    /// Adds or replaces a single extension mapping.
    pub fn mime_type(mut self, extension: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.mime_types.insert(extension.into(), content_type.into());
        self
    }

    pub fn mime_types(mut self, mime_types: HashMap<String, String>) -> Self {
        self.mime_types.extend(mime_types);
        self
    }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let protocol = match self.protocol.as_deref().filter(|p| !p.is_empty()) {
            Some(value) => Protocol::parse(value)?,
            None => Protocol::default(),
        };

        let root_dir = self
            .root_dir
            .filter(|dir| !dir.is_empty())
            .ok_or(ConfigError::MissingRootDir)?;

        Ok(ServerConfig {
            protocol,
            host: self
                .host
                .filter(|host| !host.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            root_dir,
            index_file: self
                .index_file
                .filter(|file| !file.is_empty())
                .unwrap_or_else(|| DEFAULT_INDEX_FILE.to_string()),
            not_found_file: self.not_found_file.filter(|file| !file.is_empty()),
            mime_types: MimeRegistry::with_overrides(self.mime_types),
        })
    }
}

/// On-disk shape of the YAML config.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    root_dir: Option<String>,
    index_file: Option<String>,
    not_found_file: Option<String>,
    #[serde(default)]
    mime_types: HashMap<String, String>,
}

impl ConfigFile {
    fn into_builder(self) -> ServerConfigBuilder {
        ServerConfigBuilder {
            protocol: self.protocol,
            host: self.host,
            port: self.port,
            root_dir: self.root_dir,
            index_file: self.index_file,
            not_found_file: self.not_found_file,
            mime_types: self.mime_types,
        }
    }
}
