//! 外部搜索工具进程
//!
//! - 参数顺序固定：`-U --hidden --nogroup --nocolor [-i] [-w] <pattern> <paths...>`
//! - stdout / stderr 各自按行读取，两者之间不保证顺序
//! - 进程不随 handle 释放而被杀死，也不跟宿主进程共享进程组

use crate::kernel::services::ports::search::SearchOptions;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Split};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

pub fn tool_args(options: &SearchOptions, search_paths: &[PathBuf]) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-U", "--hidden", "--nogroup", "--nocolor"]
        .into_iter()
        .map(OsString::from)
        .collect();

    if options.pattern.case_insensitive {
        args.push("-i".into());
    }
    if options.whole_word {
        args.push("-w".into());
    }

    args.push(options.pattern.source.clone().into());
    args.extend(search_paths.iter().map(|p| p.as_os_str().to_os_string()));
    args
}

/// 单个输出流的按行读取器，读到 EOF 或出错后自动关闭
pub struct OutputLines<R> {
    inner: Option<Split<BufReader<R>>>,
}

impl<R: AsyncRead + Unpin> OutputLines<R> {
    fn new(stream: Option<R>) -> Self {
        Self {
            inner: stream.map(|s| BufReader::new(s).split(b'\n')),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    pub fn close(&mut self) {
        self.inner = None;
    }

    /// `None` 表示流已结束。可在 `select!` 中安全取消。
    ///
    /// 非 UTF-8 内容按 lossy 转换，不中断整个流。
    pub async fn next_line(&mut self) -> Option<String> {
        let reader = self.inner.as_mut()?;
        match reader.next_segment().await {
            Ok(Some(mut raw)) => {
                if raw.last() == Some(&b'\r') {
                    raw.pop();
                }
                Some(String::from_utf8_lossy(&raw).into_owned())
            }
            Ok(None) => {
                self.inner = None;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "read search tool output failed");
                self.inner = None;
                None
            }
        }
    }
}

pub struct ToolProcess {
    child: Child,
    pub stdout: OutputLines<ChildStdout>,
    pub stderr: OutputLines<ChildStderr>,
    killed: bool,
}

impl ToolProcess {
    pub fn start(program: &Path, args: &[OsString]) -> io::Result<Self> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn()?;
        let stdout = OutputLines::new(child.stdout.take());
        let stderr = OutputLines::new(child.stderr.take());

        tracing::debug!(
            program = %program.display(),
            pid = ?child.id(),
            "search tool started"
        );

        Ok(Self {
            child,
            stdout,
            stderr,
            killed: false,
        })
    }

    pub fn has_output(&self) -> bool {
        self.stdout.is_open() || self.stderr.is_open()
    }

    pub fn close_output(&mut self) {
        self.stdout.close();
        self.stderr.close();
    }

    /// 可重复调用；进程已退出时什么也不做
    pub fn kill(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;
        if let Err(e) = self.child.start_kill() {
            tracing::debug!(error = %e, "kill search tool failed (already exited?)");
        }
    }

    /// 等待进程退出。被信号终止时返回 `None`。
    pub async fn wait(&mut self) -> Option<i32> {
        match self.child.wait().await {
            Ok(status) => status.code(),
            Err(e) => {
                tracing::warn!(error = %e, "wait for search tool failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/launcher.rs"]
mod tests;
