use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::ProbeError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of an external command.
#[derive(Debug)]
pub(crate) struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Runs a command with a timeout and captures its output.
///
/// The command is killed once `timeout` elapses. A non-zero exit status is
/// not an error here; use [`run_checked`] when it should be.
pub(crate) fn run(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput, ProbeError> {
    let command = describe(program, args);
    tracing::debug!(%command, "running probe command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            command: command.clone(),
            source,
        })?;

    // Drain both pipes while waiting so a chatty command can't block on a full pipe.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    reap(&mut child);
                    return Err(ProbeError::Timeout { command, timeout });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                reap(&mut child);
                return Err(ProbeError::Spawn { command, source });
            }
        }
    };

    let output = CommandOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    };
    tracing::trace!(%command, status = ?output.code(), "probe command finished");
    Ok(output)
}

/// Runs a command and returns its stdout, treating a non-zero exit as failure.
pub(crate) fn run_checked(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, ProbeError> {
    let output = run(program, args, timeout)?;
    if output.success() {
        Ok(output.stdout)
    } else {
        Err(failed(program, args, &output))
    }
}

/// Builds the error for a command that exited unsuccessfully.
pub(crate) fn failed(program: &str, args: &[&str], output: &CommandOutput) -> ProbeError {
    ProbeError::CommandFailed {
        command: describe(program, args),
        status: output.status.to_string(),
        stderr: output.stderr.trim().to_string(),
    }
}

fn describe(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

/// Kills the child and waits for it so it doesn't linger as a zombie.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
