use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TOOL_NAME: &str = "pt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_dir: Option<PathBuf>,
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    #[serde(default = "default_true")]
    pub exclude_vcs_ignored_paths: bool,
    #[serde(default = "default_ignored_names")]
    pub ignored_names: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            tool_dir: None,
            tool_name: default_tool_name(),
            exclude_vcs_ignored_paths: true,
            ignored_names: default_ignored_names(),
        }
    }
}

fn default_tool_name() -> String {
    DEFAULT_TOOL_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_ignored_names() -> Vec<String> {
    [
        ".git",
        ".hg",
        ".svn",
        ".DS_Store",
        "._*",
        "Thumbs.db",
        "desktop.ini",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
