//! ptsearch - 基于外部搜索工具（pt）的增量项目搜索
//!
//! 模块结构：
//! - core: 通用抽象（Service）
//! - kernel::services::ports: 数据契约（SearchOptions, FileResult, SearchMessage, ProjectHost）
//! - kernel::services::adapters: 实现（SearchEngine, 进程管理, 配置, git 忽略规则）

pub mod core;
pub mod kernel;
