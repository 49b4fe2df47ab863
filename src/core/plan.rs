//! Named operations expressed as ordered command lists.
//!
//! Building a plan performs no I/O; the runner executes it. Working
//! directory scopes are closures, so a `cd` can only ever cover the steps
//! issued inside it.

use serde::Serialize;
use std::fmt;

use crate::config::DeployConfig;
use crate::utils::shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Deploy,
    Restart,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[Operation::Deploy, Operation::Restart]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Deploy => "deploy",
            Operation::Restart => "restart",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Deploy => "Pull the latest source, install dependencies, restart the service",
            Operation::Restart => "Restart the service",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One remote command plus the directory it is scoped to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteCommand {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl RemoteCommand {
    /// The shell line sent to the host: `cd <cwd> && <command>` when scoped.
    pub fn shell_line(&self) -> String {
        match &self.cwd {
            Some(dir) => format!("cd {} && {}", shell::quote_arg(dir), self.command),
            None => self.command.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub operation: Operation,
    pub steps: Vec<RemoteCommand>,
}

impl Plan {
    pub fn builder(operation: Operation) -> PlanBuilder {
        PlanBuilder {
            operation,
            cwd: None,
            steps: Vec::new(),
        }
    }
}

pub struct PlanBuilder {
    operation: Operation,
    cwd: Option<String>,
    steps: Vec<RemoteCommand>,
}

impl PlanBuilder {
    /// Append a command that runs in the current scope.
    pub fn run(&mut self, command: impl Into<String>) -> &mut Self {
        self.steps.push(RemoteCommand {
            command: command.into(),
            cwd: self.cwd.clone(),
        });
        self
    }

    /// Run the commands issued by `scope` with `dir` as working directory.
    /// The previous scope is restored when `scope` returns.
    pub fn cd<F>(&mut self, dir: &str, scope: F) -> &mut Self
    where
        F: FnOnce(&mut PlanBuilder),
    {
        let outer = self.cwd.take();
        self.cwd = Some(join_dir(outer.as_deref(), dir));
        scope(self);
        self.cwd = outer;
        self
    }

    pub fn build(self) -> Plan {
        Plan {
            operation: self.operation,
            steps: self.steps,
        }
    }
}

fn join_dir(outer: Option<&str>, dir: &str) -> String {
    match outer {
        Some(outer) if !dir.starts_with('/') && !dir.starts_with('~') => {
            format!("{}/{}", outer.trim_end_matches('/'), dir)
        }
        _ => dir.to_string(),
    }
}

fn restart_service(builder: &mut PlanBuilder, config: &DeployConfig) {
    builder.run(format!("svc -t {}", config.service_path));
}

/// The ordered command list for `operation` against `config`.
pub fn plan_for(operation: Operation, config: &DeployConfig) -> Plan {
    let mut builder = Plan::builder(operation);

    match operation {
        Operation::Deploy => {
            builder.cd(&config.working_dir, |scope| {
                scope.run("git pull");
                scope.run("carton install");
            });
            restart_service(&mut builder, config);
        }
        Operation::Restart => restart_service(&mut builder, config),
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(plan: &Plan) -> Vec<String> {
        plan.steps.iter().map(RemoteCommand::shell_line).collect()
    }

    #[test]
    fn deploy_plan_matches_remote_contract() {
        let plan = plan_for(Operation::Deploy, &DeployConfig::builtin());
        assert_eq!(
            lines(&plan),
            vec![
                "cd happyman && git pull",
                "cd happyman && carton install",
                "svc -t ~/service/happyman",
            ]
        );
        assert_eq!(plan.steps[2].cwd, None);
    }

    #[test]
    fn restart_plan_only_restarts() {
        let plan = plan_for(Operation::Restart, &DeployConfig::builtin());
        assert_eq!(lines(&plan), vec!["svc -t ~/service/happyman"]);
    }

    #[test]
    fn working_dir_does_not_reach_service_restart() {
        let mut config = DeployConfig::builtin();
        config.working_dir = "/srv/elsewhere".to_string();

        let plan = plan_for(Operation::Deploy, &config);
        assert_eq!(plan.steps[0].shell_line(), "cd /srv/elsewhere && git pull");
        assert_eq!(plan.steps[2].shell_line(), "svc -t ~/service/happyman");
        assert_eq!(
            plan.steps[2],
            plan_for(Operation::Restart, &DeployConfig::builtin()).steps[0]
        );
    }

    #[test]
    fn working_dir_with_spaces_is_quoted() {
        let cmd = RemoteCommand {
            command: "git pull".to_string(),
            cwd: Some("my app".to_string()),
        };
        assert_eq!(cmd.shell_line(), "cd 'my app' && git pull");
    }

    #[test]
    fn nested_scopes_join_and_unwind() {
        let mut builder = Plan::builder(Operation::Deploy);
        builder.cd("app", |outer| {
            outer.run("a");
            outer.cd("vendor", |inner| {
                inner.run("b");
            });
            outer.cd("/tmp", |inner| {
                inner.run("c");
            });
            outer.run("d");
        });
        builder.run("e");

        let cwds: Vec<_> = builder
            .build()
            .steps
            .into_iter()
            .map(|s| s.cwd)
            .collect();
        assert_eq!(
            cwds,
            vec![
                Some("app".to_string()),
                Some("app/vendor".to_string()),
                Some("/tmp".to_string()),
                Some("app".to_string()),
                None,
            ]
        );
    }
}
