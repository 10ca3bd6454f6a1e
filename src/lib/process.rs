// src/lib/process.rs

// dependencies
use log::debug;
use std::io;
use std::process::Command;
use thiserror::Error;

// enum type to represent errors related to running shell commands
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("command execution failed with status {status}:\n$ {command}\n{output}")]
    Failed {
        command: String,
        status: i32,
        output: String,
    },
}

/// Runs `command` through `sh -c` and returns the exit status together
/// with stdout and stderr merged. A process killed by a signal reports -1.
pub fn exec_status(command: &str) -> Result<(i32, String), ExecError> {
    let result = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} 2>&1"))
        .output()
        .map_err(|source| ExecError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let status = result.status.code().unwrap_or(-1);
    debug!("`{}` exited with status {}", command, status);
    Ok((status, String::from_utf8_lossy(&result.stdout).into_owned()))
}

// like `exec_status`, but a non-zero exit is an error
pub fn exec(command: &str) -> Result<String, ExecError> {
    match exec_status(command)? {
        (0, output) => Ok(output),
        (status, output) => Err(ExecError::Failed {
            command: command.to_string(),
            status,
            output,
        }),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn exec_captures_output() {
        assert_eq!(exec("echo hello").unwrap(), "hello\n");
    }

    #[test]
    fn exec_merges_stderr() {
        assert_eq!(exec("echo oops >&2").unwrap(), "oops\n");
    }

    #[test]
    fn exec_fails_on_non_zero_status() {
        match exec("echo broken; exit 3") {
            Err(ExecError::Failed { status, output, .. }) => {
                assert_eq!(status, 3);
                assert_eq!(output, "broken\n");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn exec_status_reports_without_failing() {
        let (status, output) = exec_status("exit 7").unwrap();
        assert_eq!(status, 7);
        assert!(output.is_empty());
    }
}
