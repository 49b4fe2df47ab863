//! Remote Deployment Runner: executes an operation's plan over one session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::config::DeployConfig;
use crate::error::{Result, TargetDetails};
use crate::plan::{plan_for, Operation, Plan};
use crate::ssh::RemoteExecutor;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub command: String,
    pub exit_code: i32,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    pub operation: Operation,
    pub host: String,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
    pub success: bool,
}

pub struct Runner<'a, E: RemoteExecutor> {
    config: &'a DeployConfig,
    executor: E,
}

impl<'a, E: RemoteExecutor> Runner<'a, E> {
    pub fn new(config: &'a DeployConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `operation` against the configured host. Stops at the first
    /// failing command; the session is closed either way.
    pub fn run(&mut self, operation: Operation) -> Result<OperationReport> {
        let plan = plan_for(operation, self.config);
        self.run_plan(&plan)
    }

    pub fn run_plan(&mut self, plan: &Plan) -> Result<OperationReport> {
        let host = self.config.host.to_string();
        let target = TargetDetails {
            host: host.clone(),
            operation: plan.operation.name().to_string(),
        };

        log_status!("deploy", "[{}] Executing task '{}'", host, plan.operation);

        let started_at = Utc::now();
        self.executor
            .connect()
            .into_remote_result(&format!("connect {}", host), target.clone())?;

        let result = self.execute_steps(plan, &host, &target);

        self.executor.disconnect();
        log_status!("deploy", "Disconnecting from {}... done.", host);

        let steps = result?;
        log_status!("deploy", "Done.");

        Ok(OperationReport {
            operation: plan.operation,
            host,
            started_at,
            steps,
            success: true,
        })
    }

    fn execute_steps(
        &mut self,
        plan: &Plan,
        host: &str,
        target: &TargetDetails,
    ) -> Result<Vec<StepReport>> {
        let mut steps = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            let line = step.shell_line();
            log_status!("deploy", "[{}] run: {}", host, line);

            let started = Instant::now();
            let output = self.executor.execute(&line);
            let duration_ms = started.elapsed().as_millis() as u64;

            let output = output.into_remote_result(&line, target.clone())?;
            steps.push(StepReport {
                command: line,
                exit_code: output.exit_code,
                duration_ms,
            });
        }

        Ok(steps)
    }
}
