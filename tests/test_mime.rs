use std::collections::HashMap;

use static_server::http::mime::{DEFAULT_CONTENT_TYPE, MimeRegistry};

#[test]
fn test_builtin_types() {
    let registry = MimeRegistry::new();

    assert_eq!(registry.lookup(Some("html")), "text/html");
    assert_eq!(registry.lookup(Some("css")), "text/css");
    assert_eq!(registry.lookup(Some("js")), "text/javascript");
    assert_eq!(registry.lookup(Some("json")), "application/json");
    assert_eq!(registry.lookup(Some("woff2")), "font/woff2");
    assert_eq!(registry.lookup(Some("svg")), "image/svg+xml");
    assert_eq!(registry.lookup(Some("7z")), "application/x-7z-compressed");
    assert_eq!(
        registry.lookup(Some("xlsx")),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(registry.lookup(Some("mp3")), "audio/mpeg");
    assert_eq!(registry.lookup(Some("pdf")), "application/pdf");
}

#[test]
fn test_unknown_or_missing_extension_uses_default() {
    let registry = MimeRegistry::new();

    assert_eq!(registry.lookup(Some("xyz")), DEFAULT_CONTENT_TYPE);
    assert_eq!(registry.lookup(Some("")), DEFAULT_CONTENT_TYPE);
    assert_eq!(registry.lookup(None), "text/plain");
}

#[test]
fn test_lookup_is_case_sensitive() {
    let registry = MimeRegistry::new();

    assert_eq!(registry.lookup(Some("PNG")), DEFAULT_CONTENT_TYPE);
}

#[test]
fn test_overrides_replace_and_extend() {
    let mut overrides = HashMap::new();
    overrides.insert("html".to_string(), "application/xhtml+xml".to_string());
    overrides.insert("wasm".to_string(), "application/wasm".to_string());

    let registry = MimeRegistry::with_overrides(overrides);

    assert_eq!(registry.lookup(Some("html")), "application/xhtml+xml");
    assert_eq!(registry.lookup(Some("wasm")), "application/wasm");
    assert_eq!(registry.lookup(Some("htm")), "text/html");
    assert_eq!(registry.lookup(Some("png")), "image/png");
    assert_eq!(MimeRegistry::new().lookup(Some("wasm")), DEFAULT_CONTENT_TYPE);
}
