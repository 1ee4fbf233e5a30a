// SPDX-License-Identifier: MPL-2.0
//! Network diagnostics run as OS subprocesses.
//!
//! Output is captured and returned verbatim; the Tools page decides how to
//! present success, failure and timeout.

use crate::error::{Error, Result};
use std::io;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    /// Stdout, or stderr when stdout is empty.
    #[must_use]
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

fn new_command(program: &str) -> Command {
    let mut cmd = Command::new(program);
    // CREATE_NO_WINDOW
    #[cfg(target_os = "windows")]
    cmd.creation_flags(0x08000000);
    cmd.kill_on_drop(true);
    cmd
}

/// Arguments passed to `ping` for `count` echo requests.
pub fn ping_args(host: &str, count: u32) -> Vec<String> {
    let count_flag = if cfg!(target_os = "windows") { "-n" } else { "-c" };
    vec![host.to_string(), count_flag.to_string(), count.to_string()]
}

/// Pings `host`. A non-zero exit is not an error; check [`CommandOutput::success`].
pub async fn ping(host: &str, count: u32, timeout: Duration) -> Result<CommandOutput> {
    tracing::info!(host, count, "running ping");
    run("ping", &ping_args(host, count), timeout).await
}

/// Dumps the network interface configuration.
///
/// Uses `ipconfig` on Windows. Elsewhere `ip addr` is tried first and
/// `ifconfig` is used when `ip` is not installed.
pub async fn ip_config(timeout: Duration) -> Result<CommandOutput> {
    if cfg!(target_os = "windows") {
        return run("ipconfig", &[], timeout).await;
    }

    match run("ip", &["addr".to_string()], timeout).await {
        Err(Error::Command(msg)) if msg.starts_with(NOT_FOUND_PREFIX) => {
            tracing::debug!("`ip` not found, falling back to ifconfig");
            run("ifconfig", &[], timeout).await
        }
        other => other,
    }
}

const NOT_FOUND_PREFIX: &str = "not found:";

async fn run(program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput> {
    let mut cmd = new_command(program);
    cmd.args(args);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::Command(format!("{NOT_FOUND_PREFIX} {program}")));
        }
        Ok(Err(err)) => return Err(Error::Command(format!("{program}: {err}"))),
        Err(_) => {
            tracing::warn!(program, secs = timeout.as_secs(), "subprocess timed out");
            return Err(Error::Timeout {
                secs: timeout.as_secs(),
            });
        }
    };

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_args_use_platform_count_flag() {
        let args = ping_args("8.8.8.8", 4);
        assert_eq!(args[0], "8.8.8.8");
        if cfg!(target_os = "windows") {
            assert_eq!(args[1], "-n");
        } else {
            assert_eq!(args[1], "-c");
        }
        assert_eq!(args[2], "4");
    }

    #[test]
    fn text_falls_back_to_stderr() {
        let output = CommandOutput {
            stdout: "  \n".into(),
            stderr: "unknown host".into(),
            success: false,
        };
        assert_eq!(output.text(), "unknown host");
    }

    #[tokio::test]
    async fn missing_program_is_a_command_error() {
        let result = run(
            "ultimate-gui-no-such-program",
            &[],
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(result, Err(Error::Command(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_program_times_out() {
        let result = run("sleep", &["5".to_string()], Duration::from_millis(100)).await;
        assert_eq!(result, Err(Error::Timeout { secs: 0 }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_is_reported() {
        let ok = run("true", &[], Duration::from_secs(5)).await.expect("run true");
        assert!(ok.success);
        let failed = run("false", &[], Duration::from_secs(5)).await.expect("run false");
        assert!(!failed.success);
    }
}
