use super::*;

fn roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/proj/a"), PathBuf::from("/proj/b")]
}

fn paths(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_no_explicit_paths_returns_roots() {
    assert_eq!(resolve_search_paths(&roots(), &[]), roots());
    assert_eq!(resolve_search_paths(&roots(), &paths(&["", ""])), roots());
}

#[test]
fn test_relative_path_without_matching_root_joins_every_root() {
    let resolved = resolve_search_paths(&roots(), &paths(&["sub/dir"]));
    assert_eq!(
        resolved,
        vec![
            PathBuf::from("/proj/a/sub/dir"),
            PathBuf::from("/proj/b/sub/dir")
        ]
    );
}

#[test]
fn test_first_segment_matching_root_name() {
    let resolved = resolve_search_paths(&roots(), &paths(&["b/src/lib"]));
    assert_eq!(resolved, vec![PathBuf::from("/proj/b/src/lib")]);

    let resolved = resolve_search_paths(&roots(), &paths(&["a"]));
    assert_eq!(resolved, vec![PathBuf::from("/proj/a")]);
}

#[test]
fn test_backslash_separates_first_segment() {
    let resolved = resolve_search_paths(&roots(), &paths(&["a\\src"]));
    assert_eq!(resolved, vec![PathBuf::from("/proj/a").join("src")]);
}

#[cfg(unix)]
#[test]
fn test_absolute_paths_kept_and_order_preserved() {
    let resolved = resolve_search_paths(&roots(), &paths(&["/tmp/x", "", "a/y", "/tmp/x"]));
    assert_eq!(
        resolved,
        vec![
            PathBuf::from("/tmp/x"),
            PathBuf::from("/proj/a/y"),
            PathBuf::from("/tmp/x"),
        ]
    );
}

#[test]
fn test_multiple_roots_with_same_name() {
    let roots = vec![
        PathBuf::from("/one/app"),
        PathBuf::from("/two/app"),
        PathBuf::from("/three/lib"),
    ];
    let resolved = resolve_search_paths(&roots, &paths(&["app/src"]));
    assert_eq!(
        resolved,
        vec![PathBuf::from("/one/app/src"), PathBuf::from("/two/app/src")]
    );
}
