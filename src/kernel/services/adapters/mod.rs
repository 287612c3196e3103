//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod dirs;
pub mod git;
pub mod host;
pub mod search;
pub mod settings;

pub use dirs::{ensure_log_dir, get_log_dir};
pub use git::{find_repo_root, GitIgnorePredicate};
pub use host::LocalProjectHost;
pub use search::{SearchEngine, SearchHandle, SearchInstance};
pub use settings::{
    default_tool_dir, ensure_settings_file, get_settings_path, load_settings, load_settings_from,
    resolve_tool_path, TOOL_DIR_ENV,
};
