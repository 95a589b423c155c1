use std::path::PathBuf;

use static_server::files::resolver::PathResolver;

#[test]
fn test_resolve_joins_relative_path() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(resolver.resolve("index.html"), PathBuf::from("/srv/www/index.html"));
    assert_eq!(
        resolver.resolve("assets/app.js"),
        PathBuf::from("/srv/www/assets/app.js")
    );
}

#[test]
fn test_resolve_collapses_dot_segments() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(
        resolver.resolve("./css/../img/./logo.png"),
        PathBuf::from("/srv/www/img/logo.png")
    );
}

#[test]
fn test_resolve_parent_segments_leave_root() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(resolver.resolve("../secret.txt"), PathBuf::from("/srv/secret.txt"));
}

#[test]
fn test_resolve_accepts_root_prefixed_path_verbatim() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(
        resolver.resolve("/srv/www/./a/../b.txt"),
        PathBuf::from("/srv/www/./a/../b.txt")
    );
}

#[test]
fn test_resolve_prefix_check_is_not_segment_aware() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(
        resolver.resolve("/srv/www-private/key.pem"),
        PathBuf::from("/srv/www-private/key.pem")
    );
}

#[test]
fn test_resolve_absolute_path_replaces_root() {
    let resolver = PathResolver::new("/srv/www");

    assert_eq!(resolver.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
}

#[test]
fn test_resolve_relative_root_against_working_directory() {
    let resolver = PathResolver::new("public");
    let cwd = std::env::current_dir().unwrap();

    assert_eq!(resolver.resolve("a.txt"), cwd.join("public").join("a.txt"));
    assert_eq!(resolver.resolve("public/a.txt"), PathBuf::from("public/a.txt"));
}
