//! Spawning and line-scanning of the external tools.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

/// Runs external commands with a bounded runtime, echoing their combined
/// stdout/stderr line-by-line as it is produced.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    /// Upper bound on a single external call.
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Spawns `program` with `args`, feeds every output line through
    /// `extract`, and returns the first extracted value.
    ///
    /// Stdout and stderr are consumed as they are produced, not after exit:
    /// the deployment and verification tools log progress long before the
    /// marker line, and those lines must reach the operator while the call is
    /// still running. Every line is echoed at info level.
    ///
    /// A non-zero exit status or an elapsed timeout is an error. An absent
    /// match is not: callers decide whether `None` is fatal.
    pub async fn run_scan<T>(
        &self,
        program: &str,
        args: &[String],
        mut extract: impl FnMut(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        tracing::debug!(program, ?args, "Running command");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn `{program}` - is it installed?"))?;

        let stdout = child.stdout.take().context("child stdout not captured")?;
        let stderr = child.stderr.take().context("child stderr not captured")?;

        let scan = async {
            let mut stdout = BufReader::new(stdout).lines();
            let mut stderr = BufReader::new(stderr).lines();
            let mut stdout_open = true;
            let mut stderr_open = true;
            let mut matched = None;

            while stdout_open || stderr_open {
                let next = tokio::select! {
                    line = stdout.next_line(), if stdout_open => {
                        (line.context("reading child stdout")?, &mut stdout_open)
                    }
                    line = stderr.next_line(), if stderr_open => {
                        (line.context("reading child stderr")?, &mut stderr_open)
                    }
                };

                match next {
                    (Some(line), _) => {
                        tracing::info!("{line}");
                        if matched.is_none() {
                            matched = extract(&line);
                        }
                    }
                    (None, open) => *open = false,
                }
            }

            let status = child.wait().await.context("waiting for child process")?;
            Ok::<_, anyhow::Error>((status, matched))
        };

        let (status, matched) = match timeout(self.timeout, scan).await {
            Ok(result) => result?,
            Err(_) => bail!(
                "`{program}` did not finish within {}s",
                self.timeout.as_secs()
            ),
        };

        if !status.success() {
            bail!("`{program}` exited with {status}");
        }

        Ok(matched)
    }

    /// Runs `program` to completion and returns its trimmed stdout.
    ///
    /// For short helper invocations (ABI encoding) whose entire output is the
    /// result. A non-zero exit is an error carrying the tool's stderr.
    pub async fn run_capture(&self, program: &str, args: &[String]) -> Result<String> {
        tracing::debug!(program, ?args, "Capturing command output");

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(output) => {
                output.with_context(|| format!("failed to spawn `{program}` - is it installed?"))?
            }
            Err(_) => bail!(
                "`{program}` did not finish within {}s",
                self.timeout.as_secs()
            ),
        };

        if !output.status.success() {
            bail!(
                "`{program}` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
