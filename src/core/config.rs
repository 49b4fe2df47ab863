//! Deployment target configuration.
//!
//! Fixed at startup and passed by reference into the runner. Nothing is
//! read from the environment or the filesystem; tests substitute a host
//! by building their own `DeployConfig`.

use std::fmt;

pub const DEFAULT_USER: &str = "shaperia";
pub const DEFAULT_HOSTNAME: &str = "happyman.skyshaper.org";
pub const DEFAULT_WORKING_DIR: &str = "happyman";
pub const DEFAULT_SERVICE_PATH: &str = "~/service/happyman";

/// Remote login shell every command line is wrapped in.
pub const REMOTE_SHELL: &str = "/bin/bash -l -c";

const DEFAULT_SSH_PORT: u16 = 22;

/// SSH connection identity: `user@hostname`, optionally on a non-default port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub user: String,
    pub hostname: String,
    pub port: u16,
}

impl Host {
    pub fn new(user: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            hostname: hostname.into(),
            port: DEFAULT_SSH_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `user@hostname` as handed to ssh (the port travels separately via `-p`).
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.hostname)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DEFAULT_SSH_PORT {
            write!(f, "{}@{}", self.user, self.hostname)
        } else {
            write!(f, "{}@{}:{}", self.user, self.hostname, self.port)
        }
    }
}

/// Immutable description of where operations run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub host: Host,
    /// Remote directory the source update and dependency install run in.
    pub working_dir: String,
    /// Control path handed to `svc`; never affected by `working_dir`.
    pub service_path: String,
}

impl DeployConfig {
    pub fn builtin() -> Self {
        Self {
            host: Host::new(DEFAULT_USER, DEFAULT_HOSTNAME),
            working_dir: DEFAULT_WORKING_DIR.to_string(),
            service_path: DEFAULT_SERVICE_PATH.to_string(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
