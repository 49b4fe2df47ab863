use clap::Args;
use happyman_deploy::{Operation, OperationReport};

use super::{CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct RestartArgs {}

pub fn run(_args: RestartArgs, _global: &GlobalArgs) -> CmdResult<OperationReport> {
    super::run_operation(Operation::Restart)
}
