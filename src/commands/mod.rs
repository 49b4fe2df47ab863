use happyman_deploy::ssh::SshClient;
use happyman_deploy::{DeployConfig, Operation, OperationReport, Runner};

pub type CmdResult<T> = happyman_deploy::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Open an SSH session to the happyman host and run `operation`.
pub(crate) fn run_operation(operation: Operation) -> CmdResult<OperationReport> {
    let config = DeployConfig::builtin();
    let client = SshClient::from_config(&config);
    let mut runner = Runner::new(&config, client);

    let report = runner.run(operation)?;
    Ok((report, 0))
}

pub mod deploy;
pub mod list;
pub mod restart;

pub(crate) fn run_markdown(
    command: crate::Commands,
    _global: &GlobalArgs,
) -> happyman_deploy::Result<(String, i32)> {
    match command {
        crate::Commands::List => list::run_markdown(),
        _ => Err(happyman_deploy::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support markdown output",
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (happyman_deploy::Result<serde_json::Value>, i32) {
    crate::tty::status("happyman-deploy is working...");

    match command {
        crate::Commands::Deploy(args) => dispatch!(args, global, deploy),
        crate::Commands::Restart(args) => dispatch!(args, global, restart),

        // Special case: List uses raw output mode
        crate::Commands::List => {
            let err = happyman_deploy::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
