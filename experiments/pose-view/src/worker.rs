use std::ffi::OsStr;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// Flag that makes `pose-view` run the capture loop itself instead of
/// supervising a worker.
pub const WORKER_FLAG: &str = "--worker";

#[derive(Debug)]
pub enum WorkerError {
    Spawn(String),
    Wait(String),
    Kill(String),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::Spawn(msg) => write!(f, "failed to start worker: {msg}"),
            WorkerError::Wait(msg) => write!(f, "failed to wait for worker: {msg}"),
            WorkerError::Kill(msg) => write!(f, "failed to kill worker: {msg}"),
        }
    }
}

impl std::error::Error for WorkerError {}

/// A child process whose output is forwarded to our log, one line per
/// record, prefixed with its pid.
pub struct WorkerProcess {
    child: Child,
    pid: u32,
    forwarders: Vec<JoinHandle<()>>,
}

impl WorkerProcess {
    pub fn spawn<I, A>(program: impl AsRef<OsStr>, args: I) -> Result<Self, WorkerError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        let pid = child.id().unwrap_or(0);
        let mut forwarders = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            forwarders.push(tokio::spawn(forward_lines(stdout, pid, false)));
        }
        if let Some(stderr) = child.stderr.take() {
            forwarders.push(tokio::spawn(forward_lines(stderr, pid, true)));
        }

        log::debug!("worker {} started", pid);
        Ok(Self {
            child,
            pid,
            forwarders,
        })
    }

    /// Start this executable again as a worker with the given arguments.
    pub fn spawn_self<I, A>(args: I) -> Result<Self, WorkerError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let exe = std::env::current_exe().map_err(|e| WorkerError::Spawn(e.to_string()))?;
        let args: Vec<std::ffi::OsString> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .chain(std::iter::once(WORKER_FLAG.into()))
            .collect();
        Self::spawn(exe, args)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Wait for the worker to exit and all of its output to be logged.
    /// Returns the exit code; death by signal N maps to 128 + N.
    pub async fn wait(&mut self) -> Result<i32, WorkerError> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|e| WorkerError::Wait(e.to_string()))?;

        for forwarder in self.forwarders.drain(..) {
            let _ = forwarder.await;
        }

        let code = exit_code(status);
        log::debug!("worker {} exited with {}", self.pid, code);
        Ok(code)
    }

    pub async fn kill(&mut self) -> Result<(), WorkerError> {
        log::info!("stopping worker {}", self.pid);
        self.child
            .kill()
            .await
            .map_err(|e| WorkerError::Kill(e.to_string()))
    }
}

async fn forward_lines(reader: impl AsyncRead + Unpin, pid: u32, is_stderr: bool) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if is_stderr => log::warn!("[{}] {}", pid, line),
            Ok(Some(line)) => log::info!("[{}] {}", pid, line),
            Ok(None) => break,
            Err(e) => {
                log::debug!("[{}] output closed: {}", pid, e);
                break;
            }
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
