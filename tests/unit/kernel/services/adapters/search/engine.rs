use super::*;
use crate::kernel::services::ports::host::IgnorePredicate;
use crate::kernel::services::ports::search::SearchMessage;
use crate::kernel::services::ports::settings::SearchSettings;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

fn create_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

struct MissingToolHost {
    dir: PathBuf,
}

impl ProjectHost for MissingToolHost {
    fn project_roots(&self) -> Vec<PathBuf> {
        vec![self.dir.clone()]
    }

    fn settings(&self) -> SearchSettings {
        SearchSettings {
            tool_dir: Some(self.dir.clone()),
            exclude_vcs_ignored_paths: false,
            ..SearchSettings::default()
        }
    }

    fn ignore_predicates(&self) -> Vec<Arc<dyn IgnorePredicate>> {
        Vec::new()
    }
}

#[test]
fn test_scan_resolves_when_tool_missing() {
    let rt = create_runtime();
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::new(
        rt.handle().clone(),
        Arc::new(MissingToolHost {
            dir: dir.path().to_path_buf(),
        }),
    );
    assert_eq!(engine.name(), "SearchEngine");

    let (tx, rx) = mpsc::channel();
    let handle = engine.scan(
        FindOptions::default(),
        SearchPattern::new("foo", false),
        None,
        tx,
    );

    let message = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(message.search_id(), handle.id());
    assert!(matches!(message, SearchMessage::Diagnostic { .. }));

    rt.block_on(async {
        tokio::time::timeout(Duration::from_secs(5), handle.wait())
            .await
            .unwrap()
    });
    // sink 随会话释放
    assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
}

#[test]
fn test_each_scan_is_independent() {
    let rt = create_runtime();
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::new(
        rt.handle().clone(),
        Arc::new(MissingToolHost {
            dir: dir.path().to_path_buf(),
        }),
    );

    let (tx, rx) = mpsc::channel();
    let first = engine.scan(
        FindOptions::default(),
        SearchPattern::new("a", false),
        Some(ScanExtras {
            paths: vec!["src".to_string()],
        }),
        tx.clone(),
    );
    let second = engine.scan_options(SearchOptions::new(SearchPattern::new("b", false)), tx);
    assert_ne!(first.id(), second.id());

    first.cancel();
    rt.block_on(async {
        tokio::time::timeout(Duration::from_secs(5), async {
            first.wait().await;
            second.wait().await;
        })
        .await
        .unwrap()
    });

    let ids: Vec<u64> = rx.try_iter().map(|m| m.search_id()).collect();
    assert!(ids.contains(&second.id()));
    assert!(ids.iter().all(|id| *id == first.id() || *id == second.id()));
}

#[test]
fn test_closure_sink() {
    let rt = create_runtime();
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::new(
        rt.handle().clone(),
        Arc::new(MissingToolHost {
            dir: dir.path().to_path_buf(),
        }),
    );

    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let handle = engine.scan(FindOptions { whole_word: true }, SearchPattern::new("x", true), None, {
        let seen = seen.clone();
        move |message: SearchMessage| seen.lock().unwrap().push(message)
    });

    rt.block_on(async {
        tokio::time::timeout(Duration::from_secs(5), handle.wait())
            .await
            .unwrap()
    });
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_async_receiver_on_current_thread_runtime() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::new(
        rt.handle().clone(),
        Arc::new(MissingToolHost {
            dir: dir.path().to_path_buf(),
        }),
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let options = SearchOptions::new(SearchPattern::new("foo", false)).with_paths(["src", "docs"]);
    assert_eq!(options.explicit_paths, vec!["src".to_string(), "docs".to_string()]);
    let handle = engine.scan_options(options, tx);

    // 任务只在 block_on 中被推进
    let messages = rt.block_on(async {
        tokio::time::timeout(Duration::from_secs(5), async {
            let mut messages = Vec::new();
            while let Some(message) = rx.recv().await {
                messages.push(message);
            }
            handle.wait().await;
            messages
        })
        .await
        .unwrap()
    });

    assert!(handle.is_done());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].search_id(), handle.id());
}
