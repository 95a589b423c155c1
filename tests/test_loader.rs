use std::collections::HashMap;
use std::fs;

use static_server::files::loader::{ContentLoader, ReadError};
use static_server::files::resolver::PathResolver;
use static_server::http::mime::MimeRegistry;
use tempfile::TempDir;

fn loader_for(dir: &TempDir) -> ContentLoader {
    let root = dir.path().to_str().unwrap();
    ContentLoader::new(PathResolver::new(root), MimeRegistry::new())
}

#[tokio::test]
async fn test_load_text_file_adds_charset() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.html"), "<h1>Hi</h1>").unwrap();

    let content = loader_for(&dir).load("page.html").await.unwrap();

    assert_eq!(content.bytes, b"<h1>Hi</h1>".to_vec());
    assert_eq!(content.content_type, "text/html; charset=utf-8");
}

#[tokio::test]
async fn test_load_binary_file_has_no_charset() {
    let dir = tempfile::tempdir().unwrap();
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];
    fs::write(dir.path().join("logo.png"), &png).unwrap();

    let content = loader_for(&dir).load("logo.png").await.unwrap();

    assert_eq!(content.bytes, png);
    assert_eq!(content.content_type, "image/png");
}

#[tokio::test]
async fn test_load_file_without_extension_uses_default_type() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("LICENSE"), "MIT").unwrap();

    let content = loader_for(&dir).load("LICENSE").await.unwrap();

    assert_eq!(content.content_type, "text/plain; charset=utf-8");
}

#[tokio::test]
async fn test_load_nested_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("assets/js")).unwrap();
    fs::write(dir.path().join("assets/js/app.js"), "run()").unwrap();

    let content = loader_for(&dir).load("assets/js/app.js").await.unwrap();

    assert_eq!(content.bytes, b"run()".to_vec());
    assert_eq!(content.content_type, "text/javascript; charset=utf-8");
}

#[tokio::test]
async fn test_load_root_prefixed_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.json");
    fs::write(&file, "{}").unwrap();

    let content = loader_for(&dir)
        .load(file.to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(content.content_type, "application/json");
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = loader_for(&dir).load("missing.html").await.unwrap_err();

    assert!(matches!(err, ReadError::NotFound { .. }));
    assert_eq!(err.path(), dir.path().join("missing.html"));
}

#[tokio::test]
async fn test_load_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();

    let result = loader_for(&dir).load("docs").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_charset_follows_text_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let mut overrides = HashMap::new();
    overrides.insert("md".to_string(), "text/markdown".to_string());
    overrides.insert("tpl".to_string(), "textual/template".to_string());
    overrides.insert("js".to_string(), "application/javascript".to_string());

    let loader = ContentLoader::new(
        PathResolver::new(dir.path().to_str().unwrap()),
        MimeRegistry::with_overrides(overrides),
    );

    assert_eq!(loader.content_type(Some("md")), "text/markdown; charset=utf-8");
    assert_eq!(loader.content_type(Some("tpl")), "textual/template; charset=utf-8");
    assert_eq!(loader.content_type(Some("js")), "application/javascript");
    assert_eq!(loader.content_type(None), "text/plain; charset=utf-8");
}
