//! 测试用的 pt 替身
//!
//! - 普通文件/目录：按字面量逐行搜索（支持 `-i`），输出 `path:line:text`
//! - `*.ptstub` 文件：按脚本回放，每行一条指令：
//!   `out: <text>` / `err: <text>` / `sleep: <ms>` / `exit: <code>`

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCRIPT_EXT: &str = "ptstub";

struct Args {
    pattern: String,
    ignore_case: bool,
    paths: Vec<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut ignore_case = false;
    let mut pattern = None;
    let mut paths = Vec::new();

    for arg in std::env::args().skip(1) {
        if pattern.is_none() && arg.starts_with('-') {
            if arg == "-i" {
                ignore_case = true;
            }
            continue;
        }
        if pattern.is_none() {
            pattern = Some(arg);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    Some(Args {
        pattern: pattern?,
        ignore_case,
        paths,
    })
}

struct Stub {
    out: io::StdoutLock<'static>,
    err: io::StderrLock<'static>,
    matched: bool,
}

impl Stub {
    fn replay(&mut self, script: &Path) -> Option<i32> {
        let text = std::fs::read_to_string(script).unwrap_or_default();
        for line in text.lines() {
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.strip_prefix(' ').unwrap_or(value);
            match directive.trim() {
                "out" => {
                    self.matched = true;
                    let _ = writeln!(self.out, "{}", value);
                    let _ = self.out.flush();
                }
                "err" => {
                    let _ = writeln!(self.err, "{}", value);
                    let _ = self.err.flush();
                }
                "sleep" => {
                    let ms = value.trim().parse::<u64>().unwrap_or(0);
                    std::thread::sleep(Duration::from_millis(ms));
                }
                "exit" => return Some(value.trim().parse::<i32>().unwrap_or(0)),
                _ => {}
            }
        }
        None
    }

    fn search_path(&mut self, path: &Path, needle: &str, ignore_case: bool) -> Option<i32> {
        if path.extension().is_some_and(|ext| ext == SCRIPT_EXT) {
            return self.replay(path);
        }

        if path.is_dir() {
            let mut entries: Vec<PathBuf> = match std::fs::read_dir(path) {
                Ok(rd) => rd.filter_map(|e| e.ok().map(|e| e.path())).collect(),
                Err(e) => {
                    let _ = writeln!(self.err, "{}: {}", path.display(), e);
                    return None;
                }
            };
            entries.sort();
            for entry in entries {
                if let Some(code) = self.search_path(&entry, needle, ignore_case) {
                    return Some(code);
                }
            }
            return None;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let _ = writeln!(
                    self.err,
                    "open {}: no such file or directory",
                    path.display()
                );
                return None;
            }
            Err(e) => {
                let _ = writeln!(self.err, "{}: {}", path.display(), e);
                return None;
            }
        };

        if bytes.iter().take(8192).any(|&b| b == 0) {
            return None;
        }

        let text = String::from_utf8_lossy(&bytes);
        for (idx, line) in text.lines().enumerate() {
            let hit = if ignore_case {
                line.to_lowercase().contains(needle)
            } else {
                line.contains(needle)
            };
            if hit {
                self.matched = true;
                let _ = writeln!(self.out, "{}:{}:{}", path.display(), idx + 1, line);
            }
        }
        let _ = self.out.flush();
        None
    }
}

fn main() {
    let Some(args) = parse_args() else {
        eprintln!("usage: ptsearch_tool_stub [flags] PATTERN [PATH...]");
        std::process::exit(2);
    };

    let needle = if args.ignore_case {
        args.pattern.to_lowercase()
    } else {
        args.pattern.clone()
    };

    let mut stub = Stub {
        out: io::stdout().lock(),
        err: io::stderr().lock(),
        matched: false,
    };

    for path in &args.paths {
        if let Some(code) = stub.search_path(path, &needle, args.ignore_case) {
            std::process::exit(code);
        }
    }

    std::process::exit(if stub.matched { 0 } else { 1 });
}
