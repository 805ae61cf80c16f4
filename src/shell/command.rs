//! External process execution with a deadline.

use crate::error::{Result, SearchError};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Spawn attempts after ETXTBSY before giving up.
const SPAWN_RETRIES: u32 = 5;

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Timeout (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

/// Render a program and its arguments for error messages.
pub fn display_command(program: &Path, args: &[&str]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

/// Run `program` directly (no shell) and capture its output.
///
/// Stdin is closed. Both pipes are drained on background threads so a
/// child that writes more than a pipe buffer cannot block while we poll.
/// The deadline also covers collecting that output: a background process
/// left holding the pipes open cannot stretch the run past `options.timeout`.
///
/// A nonzero exit is reported in the returned [`CommandResult`], not as an
/// error.
///
/// # Errors
///
/// Returns `CommandFailed` if the program cannot be spawned, and
/// `CommandTimedOut` if it outlives `options.timeout` (the child is killed
/// and reaped first).
pub fn execute(program: &Path, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = display_command(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    tracing::debug!("Spawning: {}", rendered);
    let mut child = spawn(&mut cmd).map_err(|e| SearchError::CommandFailed {
        command: rendered.clone(),
        code: None,
        stderr: e.to_string(),
    })?;

    let deadline = options.timeout.map(|t| start + t);
    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let timed_out = || SearchError::CommandTimedOut {
        command: rendered.clone(),
        timeout_secs: options.timeout.map_or(0, |t| t.as_secs()),
    };

    let status = match wait_with_deadline(&mut child, deadline)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(timed_out());
        }
    };

    let stdout = collect(&stdout_rx, deadline).ok_or_else(timed_out)?;
    let stderr = collect(&stderr_rx, deadline).ok_or_else(timed_out)?;
    let duration = start.elapsed();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        rendered,
        status.code(),
        duration
    );

    Ok(CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration,
        success: status.success(),
    })
}

/// Run `program` and return its stdout, treating a nonzero exit as failure.
pub fn execute_output(program: &Path, args: &[&str], options: &CommandOptions) -> Result<String> {
    let result = execute(program, args, options)?;
    if result.success {
        Ok(result.stdout)
    } else {
        Err(SearchError::CommandFailed {
            command: display_command(program, args),
            code: result.exit_code,
            stderr: result.stderr,
        })
    }
}

/// Spawn, retrying briefly while the executable is still open for writing.
fn spawn(cmd: &mut Command) -> std::io::Result<Child> {
    let mut attempts = 0;
    loop {
        match cmd.spawn() {
            Err(e) if e.kind() == ErrorKind::ExecutableFileBusy && attempts < SPAWN_RETRIES => {
                attempts += 1;
                thread::sleep(POLL_INTERVAL);
            }
            other => return other,
        }
    }
}

/// Read a pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Wait for a drained pipe, giving up (`None`) at the deadline.
///
/// The reader thread is left behind on timeout; it ends once the last
/// process holding the pipe exits.
fn collect(rx: &Receiver<String>, deadline: Option<Instant>) -> Option<String> {
    let Some(deadline) = deadline else {
        return Some(rx.recv().unwrap_or_default());
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(output) => Some(output),
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}

/// Poll until the child exits or the deadline passes (`Ok(None)`).
fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Instant>,
) -> Result<Option<std::process::ExitStatus>> {
    let Some(deadline) = deadline else {
        return Ok(Some(child.wait()?));
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
