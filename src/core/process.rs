// ─── Process Runner ───
// Runs an external executable and reports its outcome as data. A failed
// launch and a non-zero exit both land in `exit_error`, never in the
// error channel, so the caller decides severity.

use std::ffi::OsStr;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}")]
    NonZeroExit { program: String, code: Option<i32> },
}

/// Uniform result shape for subprocess invocations.
#[derive(Debug)]
pub struct ProcessOutput {
    pub exit_error: Option<SubprocessError>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_error.is_none()
    }
}

/// Execute `program` with `args`, wait for termination and capture both
/// output streams. Never panics and never returns `Err`.
pub fn run_command<I, S>(program: &str, args: I) -> ProcessOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    debug!("Running subprocess: {}", program);

    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(source) => {
            return ProcessOutput {
                exit_error: Some(SubprocessError::Launch {
                    program: program.to_string(),
                    source,
                }),
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let exit_error = if output.status.success() {
        None
    } else {
        Some(SubprocessError::NonZeroExit {
            program: program.to_string(),
            code: output.status.code(),
        })
    };

    ProcessOutput {
        exit_error,
        stdout,
        stderr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn zero_exit_has_no_error() {
        let result = run_command("sh", ["-c", "exit 0"]);
        assert!(result.succeeded());
    }

    #[test]
    #[cfg(unix)]
    fn non_zero_exit_is_reported_as_data() {
        let result = run_command("sh", ["-c", "exit 3"]);
        match result.exit_error {
            Some(SubprocessError::NonZeroExit { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn stdout_and_stderr_are_captured() {
        let result = run_command("sh", ["-c", "echo out; echo err >&2"]);
        assert!(result.succeeded());
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
    }

    #[test]
    fn launch_failure_is_reported_as_data() {
        let result = run_command("definitely-not-a-real-executable", ["-jar", "x.jar"]);
        assert!(matches!(
            result.exit_error,
            Some(SubprocessError::Launch { .. })
        ));
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
    }
}
