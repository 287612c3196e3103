//! Service ports: traits + data contracts.

pub mod host;
pub mod search;
pub mod settings;

pub use host::{IgnorePredicate, ProjectHost};
pub use search::{
    FileResult, FindOptions, Match, Point, Range, ScanExtras, SearchError, SearchMessage,
    SearchOptions, SearchPattern, SearchSink,
};
pub use settings::SearchSettings;
