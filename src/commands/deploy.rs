use clap::Args;
use happyman_deploy::{Operation, OperationReport};

use super::{CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct DeployArgs {}

pub fn run(_args: DeployArgs, _global: &GlobalArgs) -> CmdResult<OperationReport> {
    super::run_operation(Operation::Deploy)
}
