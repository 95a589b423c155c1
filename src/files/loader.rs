//! Whole-file content loading with content-type detection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::files::resolver::PathResolver;
use crate::http::mime::MimeRegistry;

const EXTENSION_SEPARATOR: char = '.';
const TEXT_TYPE_PREFIX: &str = "text";
const CHARSET: &str = "utf-8";

/// Failure to produce content for a path.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => ReadError::NotFound { path },
            _ => ReadError::Io { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReadError::NotFound { path } | ReadError::Io { path, .. } => path,
        }
    }
}

/// The bytes of a file and the content type to serve them with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Resolves a path, reads the file in one go and types it.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    resolver: PathResolver,
    mime_types: MimeRegistry,
}

impl ContentLoader {
    pub fn new(resolver: PathResolver, mime_types: MimeRegistry) -> Self {
        Self {
            resolver,
            mime_types,
        }
    }

    /// Loads `file` (request-relative or already under the root).
    ///
    /// Directories and unreadable files fail with [`ReadError::Io`],
    /// missing files with [`ReadError::NotFound`].
    pub async fn load(&self, file: &str) -> Result<Content, ReadError> {
        let path = self.resolver.resolve(file);
        let content_type = self.content_type(extension(&path));

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ReadError::from_io(path.clone(), e))?;

        tracing::trace!(path = %path.display(), bytes = bytes.len(), "Loaded file");

        Ok(Content {
            bytes,
            content_type,
        })
    }

    /// Content type for `extension`, with a charset for textual types.
    ///
    /// The textual test is a prefix match on `"text"`, not a parse of the
    /// MIME top-level type.
    pub fn content_type(&self, extension: Option<&str>) -> String {
        let mime_type = self.mime_types.lookup(extension);

        if mime_type.starts_with(TEXT_TYPE_PREFIX) {
            format!("{mime_type}; charset={CHARSET}")
        } else {
            mime_type.to_string()
        }
    }
}

/// Text after the last `.` of the file name, if there is one.
///
/// Leading-dot names count: `.env` has the extension `env`.
pub fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind(EXTENSION_SEPARATOR).map(|pos| &name[pos + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_takes_last_segment() {
        assert_eq!(extension(Path::new("/a/b.tar.gz")), Some("gz"));
        assert_eq!(extension(Path::new("/a/.env")), Some("env"));
        assert_eq!(extension(Path::new("/a/trailing.")), Some(""));
        assert_eq!(extension(Path::new("/a.d/Makefile")), None);
    }
}
