use clap::Parser;
use ptsearch::core::Service;
use ptsearch::kernel::services::adapters::{
    ensure_settings_file, load_settings, LocalProjectHost, SearchEngine,
};
use ptsearch::kernel::services::ports::{
    FileResult, FindOptions, ScanExtras, SearchMessage, SearchPattern,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

mod logging;

#[derive(Parser)]
#[command(name = "ptsearch")]
#[command(about = "Incremental project search on top of the platinum searcher (pt)")]
struct Cli {
    /// Pattern (regular expression)
    #[arg(required_unless_present = "init_settings")]
    pattern: Option<String>,

    /// Paths to search, absolute or relative to the project roots
    paths: Vec<String>,

    /// Project root (repeatable, defaults to the current directory)
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// Case-insensitive search
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Match whole words only
    #[arg(short = 'w', long = "word")]
    whole_word: bool,

    /// Treat the pattern as a literal string
    #[arg(short = 'F', long)]
    fixed_strings: bool,

    /// Directory containing the search tool
    #[arg(long)]
    tool_dir: Option<PathBuf>,

    /// Do not exclude paths ignored by version control
    #[arg(long)]
    no_vcs_ignore: bool,

    /// Print each file result as one JSON object per line
    #[arg(long)]
    json: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Write the default settings file and print its path
    #[arg(long)]
    init_settings: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.init_settings {
        return match ensure_settings_file() {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ptsearch: {}", e);
                ExitCode::from(2)
            }
        };
    }

    let _logging = logging::init(cli.verbose);
    if let Some(guard) = _logging.as_ref().filter(|_| cli.verbose) {
        eprintln!("ptsearch: logs in {}", guard.log_dir().display());
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "ptsearch failed");
            eprintln!("ptsearch: {}", e);
            ExitCode::from(2)
        }
    }
}

/// 返回是否找到了结果
fn run(cli: Cli) -> std::io::Result<bool> {
    let Some(pattern_text) = cli.pattern else {
        return Ok(false);
    };

    let roots = if cli.roots.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        cli.roots
            .into_iter()
            .map(|root| std::fs::canonicalize(&root).unwrap_or(root))
            .collect()
    };

    let mut host = LocalProjectHost::new(roots, load_settings().unwrap_or_default());
    if let Some(dir) = cli.tool_dir {
        host.settings_mut().tool_dir = Some(dir);
    }
    if cli.no_vcs_ignore {
        host.settings_mut().exclude_vcs_ignored_paths = false;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })?;

    let engine = SearchEngine::new(runtime.handle().clone(), Arc::new(host));
    tracing::debug!(service = engine.name(), "engine ready");

    let pattern = if cli.fixed_strings {
        SearchPattern::literal(&pattern_text, cli.ignore_case)
    } else {
        SearchPattern::new(pattern_text, cli.ignore_case)
    };
    let extra = (!cli.paths.is_empty()).then(|| ScanExtras { paths: cli.paths });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = engine.scan(
        FindOptions {
            whole_word: cli.whole_word,
        },
        pattern,
        extra,
        tx,
    );

    runtime.spawn({
        let handle = handle.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.cancel();
            }
        }
    });

    // 接收循环跑在 block_on 里，current-thread 运行时也能推进搜索任务；
    // 会话结束时 sink 被释放，recv 随之返回 None
    let found = runtime.block_on(async {
        let mut found = false;
        while let Some(message) = rx.recv().await {
            match message {
                SearchMessage::FileResult { result, .. } => {
                    found |= !result.matches.is_empty();
                    print_result(&result, cli.json)?;
                }
                SearchMessage::Diagnostic { message, .. } => {
                    eprintln!("{}", message);
                }
            }
        }
        handle.wait().await;
        Ok::<bool, std::io::Error>(found)
    })?;

    Ok(found && !handle.is_cancelled())
}

fn print_result(result: &FileResult, json: bool) -> std::io::Result<()> {
    if json {
        let line = serde_json::to_string(result)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        println!("{}", line);
        return Ok(());
    }

    for m in &result.matches {
        println!(
            "{}:{}:{}:{}",
            result.file_path,
            m.range.start.row + 1,
            m.range.start.column + 1,
            m.line_text
        );
    }
    Ok(())
}
