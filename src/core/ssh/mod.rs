mod client;

pub use client::*;

/// Transport the runner drives: one session, commands in order.
///
/// `execute` receives the bare shell line (`cd happyman && git pull`);
/// any remote shell wrapping is the implementation's business.
pub trait RemoteExecutor {
    fn connect(&mut self) -> CommandOutput;
    fn execute(&mut self, command: &str) -> CommandOutput;
    fn disconnect(&mut self);
}
