//! 仓库忽略规则
//!
//! 根据项目根目录找到所在的 git 仓库，编译 `.gitignore` 和 `.git/info/exclude`，
//! 回答"这个绝对路径是否被忽略"。

use crate::kernel::services::ports::host::IgnorePredicate;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::path::{Path, PathBuf};

pub struct GitIgnorePredicate {
    repo_root: PathBuf,
    /// 由浅到深；深层规则优先
    matchers: Vec<Gitignore>,
}

impl GitIgnorePredicate {
    /// 不在 git 仓库中时返回 `None`
    pub fn discover(project_root: &Path) -> Option<Self> {
        let repo_root = find_repo_root(project_root)?;
        Some(Self::open(&repo_root, project_root))
    }

    pub fn open(repo_root: &Path, project_root: &Path) -> Self {
        let mut matchers = Vec::new();

        let git_dir = repo_root.join(".git");
        if let Some(gi) = build_matcher(
            repo_root,
            &[repo_root.join(".gitignore"), git_dir.join("info").join("exclude")],
        ) {
            matchers.push(gi);
        }

        if project_root != repo_root && project_root.starts_with(repo_root) {
            if let Some(gi) = build_matcher(project_root, &[project_root.join(".gitignore")]) {
                matchers.push(gi);
            }
        }

        Self {
            repo_root: repo_root.to_path_buf(),
            matchers,
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}

impl IgnorePredicate for GitIgnorePredicate {
    fn is_path_ignored(&self, path: &str) -> bool {
        let path = Path::new(path);
        for gi in self.matchers.iter().rev() {
            let Ok(rel) = path.strip_prefix(gi.path()) else {
                continue;
            };
            if rel.as_os_str().is_empty() {
                continue;
            }
            match gi.matched_path_or_any_parents(rel, false) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }
}

pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn build_matcher(root: &Path, files: &[PathBuf]) -> Option<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);
    let mut added = false;
    for file in files.iter().filter(|f| f.is_file()) {
        if let Some(e) = builder.add(file) {
            tracing::warn!(path = %file.display(), error = %e, "ignore file partially invalid");
        }
        added = true;
    }
    if !added {
        return None;
    }

    match builder.build() {
        Ok(gi) => Some(gi),
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "build gitignore matcher failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/git.rs"]
mod tests;
