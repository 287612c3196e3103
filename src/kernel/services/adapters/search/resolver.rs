//! 搜索路径解析
//!
//! 把用户输入的路径（可能是相对路径，也可能以某个项目根目录的名字开头）展开成
//! 交给外部工具的绝对路径列表。

use std::path::{Path, PathBuf};

/// 不去重，顺序跟随输入
pub fn resolve_search_paths(project_roots: &[PathBuf], explicit_paths: &[String]) -> Vec<PathBuf> {
    if explicit_paths.iter().all(|p| p.is_empty()) {
        return project_roots.to_vec();
    }

    let mut found = Vec::new();
    for search_path in explicit_paths {
        if search_path.is_empty() {
            continue;
        }

        if Path::new(search_path).is_absolute() {
            found.push(PathBuf::from(search_path));
            continue;
        }

        let (first, rest) = split_first_segment(search_path);
        let matching: Vec<&PathBuf> = project_roots
            .iter()
            .filter(|root| root_name(root) == Some(first))
            .collect();

        if matching.is_empty() {
            found.extend(project_roots.iter().map(|root| root.join(search_path)));
        } else {
            found.extend(matching.into_iter().map(|root| join_rest(root, rest)));
        }
    }
    found
}

fn split_first_segment(path: &str) -> (&str, &str) {
    match path.find(['/', '\\']) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (path, ""),
    }
}

fn root_name(root: &Path) -> Option<&str> {
    root.file_name().and_then(|n| n.to_str())
}

fn join_rest(root: &Path, rest: &str) -> PathBuf {
    if rest.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rest)
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/resolver.rs"]
mod tests;
