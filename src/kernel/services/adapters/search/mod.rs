//! 基于外部工具（pt）的项目搜索
//!
//! - SearchEngine: 入口，每次搜索创建一个 SearchInstance
//! - SearchInstance: 管理工具进程、取消和完成信号
//! - ResultAggregator: 解析工具输出，按文件分组
//! - ExclusionFilter: 名称 glob + 仓库忽略规则
//! - resolve_search_paths: 展开用户输入的搜索路径

mod aggregator;
mod engine;
mod exclusion;
mod instance;
mod launcher;
mod matcher;
mod resolver;

pub use aggregator::{is_benign_stderr, parse_output_line, OutputLine, ResultAggregator};
pub use engine::SearchEngine;
pub use exclusion::{glob_to_regex, ExclusionFilter};
pub use instance::{SearchHandle, SearchInstance};
pub use launcher::{tool_args, OutputLines, ToolProcess};
pub use matcher::LineMatcher;
pub use resolver::resolve_search_paths;
