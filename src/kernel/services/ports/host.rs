use super::settings::SearchSettings;
use std::path::PathBuf;
use std::sync::Arc;

/// 判断某个绝对路径是否被某个仓库的忽略规则排除（例如 .gitignore）
pub trait IgnorePredicate: Send + Sync {
    fn is_path_ignored(&self, path: &str) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_path_ignored(&self, path: &str) -> bool {
        self(path)
    }
}

/// 宿主环境：项目根目录、配置、每个根目录的忽略规则。
///
/// 每次搜索开始时读取一次，搜索过程中不再访问。
pub trait ProjectHost: Send + Sync {
    fn project_roots(&self) -> Vec<PathBuf>;

    fn settings(&self) -> SearchSettings;

    fn ignore_predicates(&self) -> Vec<Arc<dyn IgnorePredicate>>;
}
