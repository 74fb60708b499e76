//! External command execution.
//!
//! [`CommandRunner`] is the seam the inspector talks through; [`OsCommandRunner`]
//! is the concrete adapter that actually spawns processes. Tests substitute a
//! closure so no real `docker` binary is needed.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::ExecError;

/// How often a child with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Port for running an external program and capturing its stdout.
pub trait CommandRunner {
    /// Run `program` with `args`, returning stdout exactly as produced.
    ///
    /// Launch failures and non-zero exits are reported as [`ExecError`].
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ExecError>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str, &[&str]) -> Result<String, ExecError>,
{
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ExecError> {
        self(program, args)
    }
}

/// Concrete adapter: runs commands with `std::process::Command`.
///
/// Without a timeout the call blocks until the process exits. With one, the
/// child is killed once the deadline passes.
#[derive(Debug, Clone, Default)]
pub struct OsCommandRunner {
    timeout: Option<Duration>,
}

impl OsCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the process if it runs longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl CommandRunner for OsCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ExecError> {
        debug!("running: {} {}", program, args.join(" "));

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if self.timeout.is_some() {
            own_process_group(&mut command);
        }
        let mut child = command
            .spawn()
            .map_err(|e| ExecError::failed(program, args, e, ""))?;

        // Drain both pipes concurrently: a child blocked on a full pipe never exits.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let waited = match self.timeout {
            Some(timeout) => wait_with_deadline(&mut child, timeout),
            None => child.wait().map(Some),
        };

        match waited {
            Ok(Some(status)) if status.success() => Ok(collect(stdout)),
            Ok(Some(status)) => Err(ExecError::failed(program, args, status, collect(stderr))),
            Ok(None) => {
                // Surviving descendants may still hold the pipes open; the
                // drain threads are detached rather than joined.
                let timeout = self.timeout.unwrap_or_default();
                warn!(
                    "{} {} did not finish within {:?}, killed",
                    program,
                    args.join(" "),
                    timeout
                );
                Err(ExecError::TimedOut {
                    program: program.to_string(),
                    args: args.join(" "),
                    timeout,
                    stderr: String::new(),
                })
            }
            Err(e) => Err(ExecError::failed(program, args, e, collect(stderr))),
        }
    }
}

/// Put the child in its own process group so the deadline can kill its
/// descendants too.
#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) with a negative pid only signals that process group.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Wait for `child` until `timeout` elapses.
///
/// Returns `Ok(None)` when the deadline passed; the child is killed and reaped.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            // The child may exit between try_wait and kill; either way reap it.
            kill_process_group(child);
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut p| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = p.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
