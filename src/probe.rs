//! Write probe used to confirm that a read-write mount accepts writes.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tempfile::TempPath;
use thiserror::Error;
use tracing::{debug, warn};

pub const PROBE_PREFIX: &str = "checkmountpoints";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_PAYLOAD: &[u8] = b"temporary file's content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    Create,
    Write,
    Close,
    Remove,
}

impl ProbeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStep::Create => "create file",
            ProbeStep::Write => "write file",
            ProbeStep::Close => "close file",
            ProbeStep::Remove => "remove file",
        }
    }
}

impl fmt::Display for ProbeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("{step}: {source}")]
    Step { step: ProbeStep, source: io::Error },
    #[error("timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("{0}")]
    Worker(String),
}

impl ProbeFailure {
    fn at(step: ProbeStep) -> impl FnOnce(io::Error) -> ProbeFailure {
        move |source| ProbeFailure::Step { step, source }
    }

    /// Short label reported in the mount message.
    pub fn label(&self) -> String {
        match self {
            ProbeFailure::Step { step, .. } => step.as_str().to_string(),
            other => other.to_string(),
        }
    }
}

pub trait WriteProbe {
    /// Create, write, close and remove a file inside `dir`, stopping at the
    /// first step that fails.
    fn probe(&self, dir: &Path) -> Result<(), ProbeFailure>;
}

/// Probe backed by a real temporary file. With a timeout set, the steps run on
/// a worker thread that is abandoned if the filesystem does not answer in time.
#[derive(Debug, Clone, Copy)]
pub struct FileWriteProbe {
    timeout: Option<Duration>,
}

impl FileWriteProbe {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Default for FileWriteProbe {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PROBE_TIMEOUT))
    }
}

impl WriteProbe for FileWriteProbe {
    fn probe(&self, dir: &Path) -> Result<(), ProbeFailure> {
        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => return run_steps(dir),
        };
        let dir_owned = dir.to_path_buf();
        let result = with_deadline(timeout, move || run_steps(&dir_owned));
        if let Err(ProbeFailure::TimedOut(_)) = &result {
            warn!(dir = %dir.display(), timeout_secs = timeout.as_secs(), "write probe timed out");
        }
        result
    }
}

/// Run `f` on a worker thread and wait at most `timeout` for its result. On
/// expiry the worker is left running detached.
pub fn with_deadline<T, F>(timeout: Duration, f: F) -> Result<T, ProbeFailure>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProbeFailure> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("write-probe".to_string())
        .spawn(move || {
            let _ = tx.send(f());
        })
        .map_err(|e| ProbeFailure::Worker(format!("spawn probe worker: {}", e)))?;
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ProbeFailure::TimedOut(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(ProbeFailure::Worker(
            "probe worker exited without a result".to_string(),
        )),
    }
}

fn run_steps(dir: &Path) -> Result<(), ProbeFailure> {
    let mut file = tempfile::Builder::new()
        .prefix(PROBE_PREFIX)
        .tempfile_in(dir)
        .map_err(ProbeFailure::at(ProbeStep::Create))?;
    debug!(path = %file.path().display(), "created probe file");

    if let Err(err) = file.write_all(PROBE_PAYLOAD) {
        leave_behind(file.into_temp_path());
        return Err(ProbeFailure::at(ProbeStep::Write)(err));
    }
    // Dropping a File discards close errors; sync_all surfaces the deferred
    // write-back failures NFS would report on close.
    if let Err(err) = file.as_file().sync_all() {
        leave_behind(file.into_temp_path());
        return Err(ProbeFailure::at(ProbeStep::Close)(err));
    }
    let path = file.into_temp_path();

    path.close().map_err(ProbeFailure::at(ProbeStep::Remove))
}

fn leave_behind(path: TempPath) {
    match path.keep() {
        Ok(path) => warn!(path = %path.display(), "probe file left behind"),
        Err(err) => warn!(error = %err, "probe file left behind"),
    }
}
