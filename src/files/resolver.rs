//! Request path to filesystem path translation.

use std::path::{Component, Path, PathBuf};

/// Maps request-relative paths onto the configured root directory.
///
/// Resolution is pure path algebra; nothing here touches the filesystem
/// beyond reading the working directory once for a relative root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Root exactly as configured, used for the prefix shortcut.
    root_dir: String,
    /// Absolute, normalized form of the root, used for joining.
    base: PathBuf,
}

impl PathResolver {
    pub fn new(root_dir: impl Into<String>) -> Self {
        let root_dir = root_dir.into();
        let base = std::path::absolute(&root_dir)
            .map(|abs| normalize(&abs))
            .unwrap_or_else(|_| normalize(Path::new(&root_dir)));

        Self { root_dir, base }
    }

    /// Resolves `raw` against the root.
    ///
    /// A `raw` that already starts with the configured root string is
    /// returned unchanged. This is a plain string prefix test, so
    /// `/srv/app-secret/x` passes for a root of `/srv/app`. Anything else
    /// is joined onto the absolute root and `.`/`..` segments are collapsed;
    /// an absolute `raw` replaces the root entirely.
    ///
    /// ```
    /// # use std::path::PathBuf;
    /// # use static_server::files::resolver::PathResolver;
    /// let resolver = PathResolver::new("/srv/www");
    /// assert_eq!(resolver.resolve("css/../index.html"), PathBuf::from("/srv/www/index.html"));
    /// assert_eq!(resolver.resolve("/srv/www/a.txt"), PathBuf::from("/srv/www/a.txt"));
    /// ```
    pub fn resolve(&self, raw: &str) -> PathBuf {
        if raw.starts_with(&self.root_dir) {
            return PathBuf::from(raw);
        }

        normalize(&self.base.join(raw))
    }
}

/// Collapses `.` and `..` lexically. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_segments_stop_at_filesystem_root() {
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn trailing_separator_is_dropped() {
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
    }
}
