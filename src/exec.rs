//! Running the artifact against one input file.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);
/// How long to keep collecting stdout once the child has been killed.
const DRAIN_GRACE: Duration = Duration::from_millis(50);

/// What one run of the artifact produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub stdout: String,
    pub elapsed: Duration,
    /// `None` when the process was killed by a signal or by the timeout.
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl Execution {
    /// Wall-clock time in whole milliseconds, truncated.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// Runs an artifact with `input` on its standard input and captures stdout.
///
/// `Err` means the process could not be launched at all. A non-zero exit is a
/// normal [`Execution`].
pub trait Executor {
    fn execute(&self, artifact: &Path, input: File) -> io::Result<Execution>;
}

/// Spawns a real subprocess. Stderr is discarded.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    pub timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, artifact: &Path, input: File) -> io::Result<Execution> {
        let mut cmd = Command::new(artifact);
        cmd.stdin(Stdio::from(input))
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let start = Instant::now();
        let Some(limit) = self.timeout else {
            let output = cmd.output()?;
            let elapsed = start.elapsed();
            return Ok(Execution {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                elapsed,
                exit_code: output.status.code(),
                timed_out: false,
            });
        };

        let child = cmd.spawn()?;
        wait_with_limit(child, start, limit)
    }
}

fn wait_with_limit(mut child: Child, start: Instant, limit: Duration) -> io::Result<Execution> {
    // Drain stdout on a separate thread so a chatty child cannot block on a full pipe.
    // Anything the child spawned may keep the pipe open after the child is gone, so
    // the reader is never joined; its result arrives over a channel or not at all.
    let mut stdout = child.stdout.take();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(out) = stdout.as_mut() {
            let _ = out.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });

    let mut timed_out = false;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if start.elapsed() >= limit {
            log::debug!("killing pid {} after {:?}", child.id(), limit);
            child.kill()?;
            child.wait()?;
            timed_out = true;
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let drain = if timed_out {
        DRAIN_GRACE
    } else {
        limit.saturating_sub(start.elapsed()).max(DRAIN_GRACE)
    };
    let buf = match rx.recv_timeout(drain) {
        Ok(buf) => buf,
        Err(_) => {
            log::debug!("stdout still open after {:?}, abandoning reader", drain);
            timed_out = true;
            Vec::new()
        }
    };
    let elapsed = start.elapsed();

    Ok(Execution {
        stdout: String::from_utf8_lossy(&buf).into_owned(),
        elapsed,
        exit_code: status.and_then(|s| s.code()),
        timed_out,
    })
}
