use crate::config::{DeployConfig, Host, REMOTE_SHELL};
use crate::error::{Error, RemoteCommandFailedDetails, Result, TargetDetails};
use crate::ssh::RemoteExecutor;
use crate::utils::shell;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub struct SshClient {
    pub host: Host,
    /// OpenSSH control socket shared by every command of one session (unix only).
    control_path: Option<PathBuf>,
    connected: bool,
}

/// Outcome of one ssh invocation. Remote output is streamed, not captured;
/// `stderr` only carries local spawn failures.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            stderr: String::new(),
            success: true,
            exit_code: 0,
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            success: false,
            exit_code,
        }
    }

    fn from_status(status: io::Result<std::process::ExitStatus>) -> Self {
        match status {
            Ok(s) => Self {
                stderr: String::new(),
                success: s.success(),
                exit_code: s.code().unwrap_or(-1),
            },
            Err(e) => Self::failed(-1, format!("SSH error: {}", e)),
        }
    }

    pub fn into_remote_result(self, command: &str, target: TargetDetails) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        Err(Error::remote_command_failed(RemoteCommandFailedDetails {
            command: command.to_string(),
            exit_code: self.exit_code,
            stderr: self.stderr,
            target,
        }))
    }
}

impl SshClient {
    pub fn from_config(config: &DeployConfig) -> Self {
        Self {
            host: config.host.clone(),
            control_path: control_socket_path(),
            connected: false,
        }
    }

    fn build_ssh_args(&self, extra: &[&str]) -> Vec<String> {
        let mut args = Vec::new();

        if self.host.port != 22 {
            args.push("-p".to_string());
            args.push(self.host.port.to_string());
        }

        // Timeout and keepalive options prevent hangs on stalled
        // connections or unexpected prompts.
        args.extend([
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "ConnectTimeout=10".to_string(),
            "-o".to_string(),
            "ServerAliveInterval=15".to_string(),
            "-o".to_string(),
            "ServerAliveCountMax=3".to_string(),
        ]);

        if let Some(path) = &self.control_path {
            args.push("-S".to_string());
            args.push(path.display().to_string());
        }

        args.extend(extra.iter().map(|s| s.to_string()));
        args.push(self.host.destination());

        args
    }

    /// Full argument list for one remote command.
    pub fn command_args(&self, command: &str) -> Vec<String> {
        let mut args = self.build_ssh_args(&[]);
        args.push(shell::wrap_in_shell(REMOTE_SHELL, command));
        args
    }
}

impl RemoteExecutor for SshClient {
    fn connect(&mut self) -> CommandOutput {
        if self.connected {
            return CommandOutput::ok();
        }

        log_status!("ssh", "Connecting to {}", self.host);

        if self.control_path.is_none() {
            // No multiplexing: each command opens its own connection.
            self.connected = true;
            return CommandOutput::ok();
        }

        // -f backgrounds the master after authentication; its stdout must
        // not be a pipe we wait on.
        let args = self.build_ssh_args(&["-M", "-N", "-f", "-o", "ControlPersist=no"]);
        let output = CommandOutput::from_status(
            Command::new("ssh")
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::inherit())
                .status(),
        );

        self.connected = output.success;
        output
    }

    fn execute(&mut self, command: &str) -> CommandOutput {
        let args = self.command_args(command);

        // Remote stdout goes to our stderr so stdout stays free for the
        // JSON response.
        CommandOutput::from_status(
            Command::new("ssh")
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::from(io::stderr()))
                .stderr(Stdio::inherit())
                .status(),
        )
    }

    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;

        let Some(path) = self.control_path.clone() else {
            return;
        };

        let args = self.build_ssh_args(&["-O", "exit"]);
        let _ = Command::new("ssh")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        if path.exists() {
            let _ = std::fs::remove_file(&path);
        }
    }
}

impl Drop for SshClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(unix)]
fn control_socket_path() -> Option<PathBuf> {
    // Unix socket paths are length-limited; keep the name short.
    let id = uuid::Uuid::new_v4().simple().to_string();
    Some(std::env::temp_dir().join(format!("happyman-{}.sock", &id[..12])))
}

#[cfg(not(unix))]
fn control_socket_path() -> Option<PathBuf> {
    None
}
