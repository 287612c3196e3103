use serde::Serialize;
use std::io;
use std::sync::mpsc::{Sender, SyncSender};

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    Io(io::Error),
    InvalidRegex(regex::Error),
    ToolNotFound(std::path::PathBuf),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Io(e) => write!(f, "IO error: {}", e),
            SearchError::InvalidRegex(e) => write!(f, "Invalid regex: {}", e),
            SearchError::ToolNotFound(path) => write!(
                f,
                "`{}` command not found, is it installed?\nYou can change the path in ptsearch settings!",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<io::Error> for SearchError {
    fn from(e: io::Error) -> Self {
        SearchError::Io(e)
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidRegex(e)
    }
}

/// 搜索模式：正则源码 + 大小写开关
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    pub source: String,
    pub case_insensitive: bool,
}

impl SearchPattern {
    pub fn new(source: impl Into<String>, case_insensitive: bool) -> Self {
        Self {
            source: source.into(),
            case_insensitive,
        }
    }

    /// 按字面量搜索，转义所有正则元字符
    pub fn literal(text: &str, case_insensitive: bool) -> Self {
        Self::new(regex::escape(text), case_insensitive)
    }
}

/// 查找面板上的选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub whole_word: bool,
}

/// `scan` 的可选附加参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanExtras {
    pub paths: Vec<String>,
}

/// 一次搜索会话的完整描述，会话开始后不再变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: SearchPattern,
    pub whole_word: bool,
    pub explicit_paths: Vec<String>,
}

impl SearchOptions {
    pub fn new(pattern: SearchPattern) -> Self {
        Self {
            pattern,
            whole_word: false,
            explicit_paths: Vec::new(),
        }
    }

    pub fn from_parts(find: FindOptions, pattern: SearchPattern, extra: Option<ScanExtras>) -> Self {
        Self {
            pattern,
            whole_word: find.whole_word,
            explicit_paths: extra.map(|e| e.paths).unwrap_or_default(),
        }
    }

    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

/// (row, column)，均从 0 开始；column 以字符计
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// 左闭右开
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub line_text: String,
    pub match_text: String,
    pub range: Range,
    pub line_text_offset: usize,
}

impl Match {
    pub fn new(line_text: &str, match_text: &str, row: usize, start_col: usize) -> Self {
        let end_col = start_col + match_text.chars().count();
        Self {
            line_text: line_text.to_string(),
            match_text: match_text.to_string(),
            range: Range {
                start: Point::new(row, start_col),
                end: Point::new(row, end_col),
            },
            line_text_offset: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.range.start.row
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub file_path: String,
    pub matches: Vec<Match>,
}

impl FileResult {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            matches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMessage {
    FileResult {
        search_id: u64,
        result: FileResult,
    },
    Diagnostic {
        search_id: u64,
        message: String,
    },
}

impl SearchMessage {
    pub fn search_id(&self) -> u64 {
        match self {
            SearchMessage::FileResult { search_id, .. }
            | SearchMessage::Diagnostic { search_id, .. } => *search_id,
        }
    }
}

/// 结果接收端。每个事件调用一次，接收端已关闭时静默丢弃。
pub trait SearchSink: Send + 'static {
    fn deliver(&mut self, message: SearchMessage);
}

impl<F> SearchSink for F
where
    F: FnMut(SearchMessage) + Send + 'static,
{
    fn deliver(&mut self, message: SearchMessage) {
        self(message)
    }
}

impl SearchSink for Sender<SearchMessage> {
    fn deliver(&mut self, message: SearchMessage) {
        let _ = self.send(message);
    }
}

impl SearchSink for SyncSender<SearchMessage> {
    fn deliver(&mut self, message: SearchMessage) {
        let _ = self.send(message);
    }
}

impl SearchSink for tokio::sync::mpsc::UnboundedSender<SearchMessage> {
    fn deliver(&mut self, message: SearchMessage) {
        let _ = self.send(message);
    }
}
