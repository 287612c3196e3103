//! 行内匹配器
//!
//! 外部工具只告诉我们"哪一行命中"，具体的列位置需要在这一行里重新匹配一次。
//! 模式只编译一次，之后每行复用。

use crate::kernel::services::ports::search::{Match, SearchPattern};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct LineMatcher {
    regex: Regex,
}

impl LineMatcher {
    pub fn new(pattern: &SearchPattern, whole_word: bool) -> Result<Self, regex::Error> {
        let source = if whole_word {
            format!(r"\b(?:{})\b", pattern.source)
        } else {
            pattern.source.clone()
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(pattern.case_insensitive)
            .build()?;
        Ok(Self { regex })
    }

    /// 追加 `line` 中所有不重叠的匹配，从左到右。
    ///
    /// 空匹配直接跳过：`find_iter` 遇到空匹配总会前进至少一个字符，不会死循环。
    pub fn find_in_line(&self, line: &str, row: usize, out: &mut Vec<Match>) -> usize {
        let before = out.len();
        let mut byte_pos = 0usize;
        let mut char_pos = 0usize;

        for mat in self.regex.find_iter(line) {
            if mat.start() == mat.end() {
                continue;
            }
            char_pos += line[byte_pos..mat.start()].chars().count();
            byte_pos = mat.start();
            out.push(Match::new(line, mat.as_str(), row, char_pos));
        }

        out.len() - before
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/matcher.rs"]
mod tests;
