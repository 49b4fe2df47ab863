use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Markdown,
}

mod commands;
mod output;
mod tty;

use commands::{deploy, restart};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "happyman-deploy")]
#[command(version = VERSION)]
#[command(about = "Deploy and restart the happyman service over SSH")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the latest source, install dependencies, and restart the service
    Deploy(deploy::DeployArgs),
    /// Restart the service without touching the source
    Restart(restart::RestartArgs),
    /// Print the task listing (names and descriptions only; connects to nothing)
    List,
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::List => ResponseMode::Markdown,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    if let ResponseMode::Markdown = response_mode(&cli.command) {
        return match commands::run_markdown(cli.command, &global) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let _ = output::print_result::<serde_json::Value>(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(1))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
