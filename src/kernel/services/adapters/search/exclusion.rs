//! 结果排除规则
//!
//! - 名称模式：`ignored_names` 里的 glob 编译成一个正则，只在路径分段边界上匹配
//! - 仓库规则：每个项目根目录一个忽略判断（例如 .gitignore），仅在开关打开时使用

use crate::kernel::services::ports::host::IgnorePredicate;
use regex::Regex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct ExclusionFilter {
    names: Option<Regex>,
    repos: Vec<Arc<dyn IgnorePredicate>>,
}

impl ExclusionFilter {
    pub fn new(
        ignored_names: &[String],
        repos: Vec<Arc<dyn IgnorePredicate>>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            names: names_regex(ignored_names)?,
            repos,
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        if self.names.as_ref().is_some_and(|re| re.is_match(path)) {
            return true;
        }
        self.repos.iter().any(|repo| repo.is_path_ignored(path))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_none() && self.repos.is_empty()
    }
}

impl std::fmt::Debug for ExclusionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusionFilter")
            .field("names", &self.names.as_ref().map(Regex::as_str))
            .field("repos", &self.repos.len())
            .finish()
    }
}

fn names_regex(ignored_names: &[String]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = ignored_names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(glob_to_regex)
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    let source = format!(r"(?:^|[\\/])(?:{})(?:$|[\\/])", alternatives.join("|"));
    Regex::new(&source).map(Some)
}

/// `*`（连续多个也一样）匹配任意字符，其余字符按字面量处理
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    for (i, part) in glob.split('*').enumerate() {
        if i > 0 && !out.ends_with(".*") {
            out.push_str(".*");
        }
        out.push_str(&regex::escape(part));
    }
    out
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/exclusion.rs"]
mod tests;
