//! Subprocess invocation for rendered templates.
//!
//! The child's stdout and stderr are attached to the write end of a single
//! pipe, so the captured text is interleaved in the order the child wrote it.
//! stdin is closed. There is no timeout: the call blocks until the child
//! exits.

use std::io::Read;
use std::process::{Command, Stdio};

use crate::error::{CordError, Result};

/// Run `command` with `args` and return its combined output.
///
/// A blank `command` fails with [`CordError::EmptyInvocation`] without
/// spawning anything. A spawn failure or non-zero exit becomes
/// [`CordError::Execution`] carrying whatever output was captured.
pub fn execute<S: AsRef<str>>(command: &str, args: &[S]) -> Result<String> {
    if command.trim().is_empty() {
        return Err(CordError::EmptyInvocation);
    }

    let argv: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    tracing::debug!(command, args = ?argv, "running command");

    let (mut reader, writer) = std::io::pipe().map_err(spawn_failed)?;
    let stderr_writer = writer.try_clone().map_err(spawn_failed)?;

    // The Command (and with it the parent's copies of the write end) is
    // dropped at the end of this statement, so the read below sees EOF once
    // the child exits.
    let mut child = Command::new(command)
        .args(&argv)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer)
        .spawn()
        .map_err(spawn_failed)?;

    let mut captured = Vec::new();
    let read_result = reader.read_to_end(&mut captured);
    let status = child.wait();
    let output = String::from_utf8_lossy(&captured).into_owned();

    if let Err(e) = read_result {
        return Err(CordError::Execution {
            message: format!("failed to read output: {e}"),
            output,
        });
    }

    let status = status.map_err(|e| CordError::Execution {
        message: e.to_string(),
        output: output.clone(),
    })?;

    if !status.success() {
        tracing::debug!(command, %status, "command failed");
        return Err(CordError::Execution {
            message: status.to_string(),
            output,
        });
    }

    Ok(output)
}

fn spawn_failed(e: std::io::Error) -> CordError {
    CordError::Execution {
        message: e.to_string(),
        output: String::new(),
    }
}
