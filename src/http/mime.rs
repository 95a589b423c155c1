//! MIME type lookup by file extension.
//!
//! The registry starts from a fixed table of common web types and is
//! extended with caller-supplied entries. Keys are matched exactly as
//! configured, no case folding is applied.

use std::collections::HashMap;

/// Content type used for unknown extensions and for files without one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const DEFAULT_TYPES: &[(&str, &str)] = &[
    // Web documents
    ("htm", "text/html"),
    ("html", "text/html"),
    ("xhtml", "application/xhtml+xml"),
    ("xml", "application/xml"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("jsonld", "application/ld+json"),
    // Fonts
    ("ttf", "font/ttf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("otf", "font/otf"),
    ("eot", "application/vnd.ms-fontobject"),
    // Images
    ("ico", "image/ico"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    // Audio
    ("aac", "audio/aac"),
    ("mp3", "audio/mpeg"),
    ("weba", "audio/webm"),
    ("wav", "audio/wav"),
    ("opus", "audio/opus"),
    ("oga", "audio/ogg"),
    ("mid", "audio/midi"),
    ("midi", "audio/midi"),
    // Video
    ("mpeg", "video/mpeg"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("ogv", "video/ogg"),
    ("ogx", "application/ogg"),
    // Archives
    ("tar", "application/x-tar"),
    ("gz", "application/gzip"),
    ("bz", "application/x-bzip"),
    ("bz2", "application/x-bzip2"),
    ("zip", "application/zip"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    ("jar", "application/java-archive"),
    ("arc", "application/x-freearc"),
    // Office documents
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("rtf", "application/rtf"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("vsd", "application/vnd.visio"),
    ("abw", "application/x-abiword"),
    // E-books
    ("pdf", "application/pdf"),
    ("epub", "application/epub+zip"),
    // Misc
    ("txt", "text/plain"),
    ("php", "application/php"),
    ("swf", "application/x-shockwave-flash"),
];

/// Immutable extension to content-type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeRegistry {
    types: HashMap<String, String>,
}

impl MimeRegistry {
    /// Builds the registry from the built-in table only.
    pub fn new() -> Self {
        Self::with_overrides(HashMap::new())
    }

    /// Builds the registry from the built-in table merged with `overrides`.
    ///
    /// On a key collision the override wins.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use static_server::http::mime::MimeRegistry;
    /// let mut extra = HashMap::new();
    /// extra.insert("js".to_string(), "application/javascript".to_string());
    ///
    /// let registry = MimeRegistry::with_overrides(extra);
    /// assert_eq!(registry.lookup(Some("js")), "application/javascript");
    /// assert_eq!(registry.lookup(Some("css")), "text/css");
    /// ```
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut types: HashMap<String, String> = DEFAULT_TYPES
            .iter()
            .map(|(ext, ty)| (ext.to_string(), ty.to_string()))
            .collect();
        types.extend(overrides);

        Self { types }
    }

    /// Returns the base content type for `extension`.
    ///
    /// `None` or an unknown extension yields [`DEFAULT_CONTENT_TYPE`].
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        extension
            .and_then(|ext| self.types.get(ext))
            .map(|ty| ty.as_str())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
