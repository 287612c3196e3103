//! 单次搜索会话
//!
//! - 启动前：编译匹配器、构建排除规则、解析搜索路径
//! - 运行中：一个 tokio 任务同时读取 stdout / stderr，并监听取消
//! - 结束：无论正常退出、工具缺失还是被取消，完成信号只发出一次

use super::aggregator::{is_benign_stderr, ResultAggregator};
use super::exclusion::ExclusionFilter;
use super::launcher::{tool_args, ToolProcess};
use super::matcher::LineMatcher;
use super::resolver::resolve_search_paths;
use crate::kernel::services::adapters::settings::resolve_tool_path;
use crate::kernel::services::ports::host::{IgnorePredicate, ProjectHost};
use crate::kernel::services::ports::search::{
    FileResult, SearchError, SearchMessage, SearchOptions, SearchSink,
};
use crate::kernel::services::ports::settings::SearchSettings;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Notify};

static SEARCH_ID: AtomicU64 = AtomicU64::new(0);

fn next_search_id() -> u64 {
    SEARCH_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelState {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// 搜索完成句柄：等待结束 + 请求取消
#[derive(Clone)]
pub struct SearchHandle {
    id: u64,
    cancel: Arc<CancelState>,
    done: watch::Receiver<bool>,
}

impl SearchHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 可重复调用。真正的完成信号由搜索任务在退出路径上发出。
    pub fn cancel(&self) {
        if !self.cancel.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!(search_id = self.id, "search cancel requested");
            self.cancel.notify.notify_one();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_done(&self) -> bool {
        *self.done.borrow()
    }

    pub async fn wait(&self) {
        let mut done = self.done.clone();
        // Sender 被释放前一定已经写入 true，所以这里的错误可以忽略
        let _ = done.wait_for(|finished| *finished).await;
    }
}

impl std::fmt::Debug for SearchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHandle")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .field("done", &self.is_done())
            .finish()
    }
}

/// 完成信号只能发出一次：随会话一起释放时发出
struct Completion {
    tx: watch::Sender<bool>,
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

pub struct SearchInstance {
    id: u64,
    options: SearchOptions,
    settings: SearchSettings,
    project_roots: Vec<PathBuf>,
    repos: Vec<Arc<dyn IgnorePredicate>>,
    sink: Box<dyn SearchSink>,
    cancel: Arc<CancelState>,
    delivered: usize,
    _completion: Completion,
}

impl SearchInstance {
    /// 在调用方线程上读取宿主环境快照，之后的搜索过程不再访问宿主
    pub fn new(
        options: SearchOptions,
        host: &dyn ProjectHost,
        sink: Box<dyn SearchSink>,
    ) -> (Self, SearchHandle) {
        let id = next_search_id();
        let settings = host.settings();
        let repos = if settings.exclude_vcs_ignored_paths {
            host.ignore_predicates()
        } else {
            Vec::new()
        };
        let cancel = Arc::new(CancelState::default());
        let (tx, rx) = watch::channel(false);

        let handle = SearchHandle {
            id,
            cancel: cancel.clone(),
            done: rx,
        };
        let instance = Self {
            id,
            options,
            settings,
            project_roots: host.project_roots(),
            repos,
            sink,
            cancel,
            delivered: 0,
            _completion: Completion { tx },
        };
        (instance, handle)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn start(self, runtime: &tokio::runtime::Handle) {
        runtime.spawn(self.run());
    }

    async fn run(mut self) {
        let search_id = self.id;

        if self.cancel.is_cancelled() {
            tracing::debug!(search_id, "search cancelled before start");
            return;
        }

        let aggregator = match self.prepare() {
            Ok(aggregator) => aggregator,
            Err(e) => {
                tracing::warn!(search_id, error = %e, "search setup failed");
                self.deliver_diagnostic(e.to_string());
                return;
            }
        };

        let search_paths = resolve_search_paths(&self.project_roots, &self.options.explicit_paths);
        let args = tool_args(&self.options, &search_paths);
        let program = resolve_tool_path(&self.settings);

        if self.cancel.is_cancelled() {
            tracing::debug!(search_id, "search cancelled before spawn");
            return;
        }

        let process = match ToolProcess::start(&program, &args) {
            Ok(process) => process,
            Err(e) => {
                let err = if e.kind() == std::io::ErrorKind::NotFound {
                    SearchError::ToolNotFound(program.clone())
                } else {
                    SearchError::Io(e)
                };
                tracing::error!(search_id, program = %program.display(), error = %err, "spawn search tool failed");
                self.deliver_diagnostic(err.to_string());
                return;
            }
        };

        tracing::info!(
            search_id,
            pattern = %self.options.pattern.source,
            paths = search_paths.len(),
            "search started"
        );

        self.drive(process, aggregator).await;

        tracing::info!(
            search_id,
            delivered = self.delivered,
            cancelled = self.cancel.is_cancelled(),
            "search finished"
        );
    }

    fn prepare(&self) -> Result<ResultAggregator, SearchError> {
        let matcher = LineMatcher::new(&self.options.pattern, self.options.whole_word)?;
        let exclusions = ExclusionFilter::new(&self.settings.ignored_names, self.repos.clone())?;
        Ok(ResultAggregator::new(matcher, exclusions))
    }

    async fn drive(&mut self, mut process: ToolProcess, mut aggregator: ResultAggregator) {
        let cancel = self.cancel.clone();

        while process.has_output() && !cancel.is_cancelled() {
            tokio::select! {
                biased;
                _ = cancel.notify.notified() => break,
                line = process.stdout.next_line(), if process.stdout.is_open() => {
                    if let Some(line) = line {
                        if let Some(done) = aggregator.push_line(&line) {
                            self.deliver_result(done);
                        }
                    }
                }
                line = process.stderr.next_line(), if process.stderr.is_open() => {
                    if let Some(line) = line {
                        self.on_stderr_line(&line);
                    }
                }
            }
        }

        if !cancel.is_cancelled() {
            let code = tokio::select! {
                biased;
                _ = cancel.notify.notified() => None,
                code = process.wait() => Some(code),
            };
            if let Some(code) = code {
                tracing::debug!(search_id = self.id, code = ?code, "search tool exited");
                if let Some(last) = aggregator.flush() {
                    self.deliver_result(last);
                }
                return;
            }
        }

        aggregator.discard();
        process.close_output();
        process.kill();
        let code = process.wait().await;
        tracing::debug!(search_id = self.id, code = ?code, "search tool killed");
    }

    fn on_stderr_line(&mut self, line: &str) {
        if line.trim().is_empty() || is_benign_stderr(line) {
            return;
        }
        tracing::debug!(search_id = self.id, "search tool: {}", line);
        self.deliver_diagnostic(line.trim_end().to_string());
    }

    fn deliver_result(&mut self, result: FileResult) {
        self.delivered += 1;
        self.sink.deliver(SearchMessage::FileResult {
            search_id: self.id,
            result,
        });
    }

    fn deliver_diagnostic(&mut self, message: String) {
        self.sink.deliver(SearchMessage::Diagnostic {
            search_id: self.id,
            message,
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/instance.rs"]
mod tests;
