//! 搜索入口：每次 `scan` 创建一个独立的 [`SearchInstance`]

use super::instance::{SearchHandle, SearchInstance};
use crate::core::Service;
use crate::kernel::services::ports::host::ProjectHost;
use crate::kernel::services::ports::search::{
    FindOptions, ScanExtras, SearchOptions, SearchPattern, SearchSink,
};
use std::sync::Arc;

pub struct SearchEngine {
    runtime: tokio::runtime::Handle,
    host: Arc<dyn ProjectHost>,
}

impl SearchEngine {
    pub fn new(runtime: tokio::runtime::Handle, host: Arc<dyn ProjectHost>) -> Self {
        Self { runtime, host }
    }

    /// `extra` 为 `None` 时只按项目根目录搜索
    pub fn scan(
        &self,
        find: FindOptions,
        pattern: SearchPattern,
        extra: Option<ScanExtras>,
        sink: impl SearchSink,
    ) -> SearchHandle {
        self.scan_options(SearchOptions::from_parts(find, pattern, extra), sink)
    }

    pub fn scan_options(&self, options: SearchOptions, sink: impl SearchSink) -> SearchHandle {
        let (instance, handle) = SearchInstance::new(options, self.host.as_ref(), Box::new(sink));
        instance.start(&self.runtime);
        handle
    }
}

impl Service for SearchEngine {
    fn name(&self) -> &'static str {
        "SearchEngine"
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/engine.rs"]
mod tests;
