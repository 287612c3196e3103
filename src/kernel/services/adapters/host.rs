use super::git::GitIgnorePredicate;
use crate::kernel::services::ports::host::{IgnorePredicate, ProjectHost};
use crate::kernel::services::ports::settings::SearchSettings;
use std::path::PathBuf;
use std::sync::Arc;

/// 本地文件系统上的宿主：固定的项目根目录 + 配置
pub struct LocalProjectHost {
    roots: Vec<PathBuf>,
    settings: SearchSettings,
}

impl LocalProjectHost {
    pub fn new(roots: Vec<PathBuf>, settings: SearchSettings) -> Self {
        Self { roots, settings }
    }

    pub fn settings_mut(&mut self) -> &mut SearchSettings {
        &mut self.settings
    }
}

impl ProjectHost for LocalProjectHost {
    fn project_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }

    fn settings(&self) -> SearchSettings {
        self.settings.clone()
    }

    fn ignore_predicates(&self) -> Vec<Arc<dyn IgnorePredicate>> {
        self.roots
            .iter()
            .filter_map(|root| GitIgnorePredicate::discover(root))
            .map(|p| Arc::new(p) as Arc<dyn IgnorePredicate>)
            .collect()
    }
}
