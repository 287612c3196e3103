//! 输出行聚合
//!
//! 外部工具按文件连续输出命中行（`path:line:text`），这里按文件分组：
//! 遇到新的路径时把上一个文件的结果整体交出去。

use super::exclusion::ExclusionFilter;
use super::matcher::LineMatcher;
use crate::kernel::services::ports::search::FileResult;

/// `path:line:text` 中解析出的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLine<'a> {
    pub file_path: &'a str,
    pub line_number: usize,
    pub line_text: &'a str,
}

/// 对应 `^([^:]+):(\d+):(.+)$`，不符合格式返回 `None`
pub fn parse_output_line(line: &str) -> Option<OutputLine<'_>> {
    let (file_path, rest) = line.split_once(':')?;
    if file_path.is_empty() {
        return None;
    }
    let (number, line_text) = rest.split_once(':')?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if line_text.is_empty() {
        return None;
    }
    let line_number = number.parse::<usize>().ok()?;
    Some(OutputLine {
        file_path,
        line_number,
        line_text,
    })
}

/// "open ...: no such file or directory" 是文件在枚举后被删除/改名造成的，直接忽略
pub fn is_benign_stderr(line: &str) -> bool {
    line.starts_with("open") && line.ends_with("no such file or directory")
}

#[derive(Debug)]
pub struct ResultAggregator {
    matcher: LineMatcher,
    exclusions: ExclusionFilter,
    current: Option<FileResult>,
}

impl ResultAggregator {
    pub fn new(matcher: LineMatcher, exclusions: ExclusionFilter) -> Self {
        Self {
            matcher,
            exclusions,
            current: None,
        }
    }

    /// 处理一行 stdout。路径变化时返回上一个文件的完整结果。
    pub fn push_line(&mut self, line: &str) -> Option<FileResult> {
        let parsed = parse_output_line(line)?;
        if self.exclusions.is_excluded(parsed.file_path) {
            return None;
        }

        let flushed = match &self.current {
            Some(current) if current.file_path != parsed.file_path => self.flush(),
            _ => None,
        };

        let current = self
            .current
            .get_or_insert_with(|| FileResult::new(parsed.file_path));
        let row = parsed.line_number.saturating_sub(1);
        self.matcher
            .find_in_line(parsed.line_text, row, &mut current.matches);

        flushed
    }

    /// 取出当前打开的文件结果；进程正常结束时也用它交出最后一个文件
    pub fn flush(&mut self) -> Option<FileResult> {
        self.current.take()
    }

    /// 取消时调用，丢弃尚未交出的结果
    pub fn discard(&mut self) {
        if let Some(dropped) = self.current.take() {
            tracing::debug!(
                path = %dropped.file_path,
                matches = dropped.matches.len(),
                "discarding unflushed file result"
            );
        }
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.file_path.as_str())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/aggregator.rs"]
mod tests;
