//! Bounded subprocess execution
//!
//! Runs one child to completion under a wall-clock deadline. stdout and
//! stderr are drained on dedicated threads so a chatty helper can never fill
//! a pipe and deadlock the wait loop. The threads append into shared buffers
//! that can be snapshotted at any time: on timeout the child is killed,
//! reaped, and whatever was captured so far is returned immediately, without
//! waiting for the pipes to close — descendants of the helper may still hold
//! the write ends long after the helper itself is dead. Exactly one attempt
//! per call.

use crate::errors::ProviderError;
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured output of one helper run. A non-zero exit is data here, not an
/// error; classification happens in the façade after logging.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// One pipe being drained in the background. The buffer is shared so the
/// timeout path can take a snapshot without joining the reader.
struct PipeCapture {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl PipeCapture {
    fn start<R: Read + Send + 'static>(mut pipe: R) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let handle = thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend_from_slice(&chunk[..n]),
                }
            }
        });
        PipeCapture { buf, handle }
    }

    /// What has been read so far. Does not block on the reader thread.
    fn snapshot(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Full output; joins the reader, so only valid once the writers are
    /// gone (child exited and left no descendants holding the pipe).
    fn finish(self) -> String {
        let _ = self.handle.join();
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn snapshot(capture: &Option<PipeCapture>) -> String {
    capture.as_ref().map(PipeCapture::snapshot).unwrap_or_default()
}

fn finish(capture: Option<PipeCapture>) -> String {
    capture.map(PipeCapture::finish).unwrap_or_default()
}

/// Run `command` (program followed by its arguments) and wait at most
/// `timeout` for it to exit.
pub fn run(command: &[String], timeout: Duration) -> Result<ProcessOutcome, ProviderError> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| ProviderError::ExecutableNotFound(String::new()))?;

    debug!("Executing: {}", command.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProviderError::SpawnFailure {
            path: program.clone(),
            source,
        })?;

    let stdout_capture = child.stdout.take().map(PipeCapture::start);
    let stderr_capture = child.stderr.take().map(PipeCapture::start);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    // Kill and reap, then return right away with whatever
                    // stderr was captured so far. The reader threads are
                    // dropped, not joined: helper descendants may keep the
                    // pipes open, and the threads exit on their own once
                    // the last writer is gone.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProviderError::Timeout {
                        path: program.clone(),
                        timeout,
                        stderr: snapshot(&stderr_capture),
                    });
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProviderError::SpawnFailure {
                    path: program.clone(),
                    source,
                });
            }
        }
    };

    Ok(ProcessOutcome {
        stdout: finish(stdout_capture),
        stderr: finish(stderr_capture),
        code: status.code(),
    })
}
