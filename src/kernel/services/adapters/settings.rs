use crate::kernel::services::ports::settings::SearchSettings;
use std::path::PathBuf;

const SETTINGS_DIR: &str = ".ptsearch";
const SETTINGS_FILE: &str = "settings.json";

pub const TOOL_DIR_ENV: &str = "PTSEARCH_TOOL_DIR";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&SearchSettings::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_settings() -> Option<SearchSettings> {
    let path = get_settings_path()?;
    load_settings_from(&path)
}

pub fn load_settings_from(path: &std::path::Path) -> Option<SearchSettings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
            None
        }
    }
}

/// 搜索工具的完整路径：环境变量 > 配置 > 平台默认目录
pub fn resolve_tool_path(settings: &SearchSettings) -> PathBuf {
    let dir = std::env::var_os(TOOL_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| settings.tool_dir.clone().filter(|d| !d.as_os_str().is_empty()))
        .unwrap_or_else(default_tool_dir);

    let mut name = settings.tool_name.clone();
    if !std::env::consts::EXE_SUFFIX.is_empty() && !name.ends_with(std::env::consts::EXE_SUFFIX) {
        name.push_str(std::env::consts::EXE_SUFFIX);
    }
    dir.join(name)
}

pub fn default_tool_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(local).join("Programs").join("pt");
        }
        PathBuf::from(r"C:\Program Files\pt")
    }

    #[cfg(not(windows))]
    {
        PathBuf::from("/usr/local/bin")
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
