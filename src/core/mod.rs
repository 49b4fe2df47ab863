// Public modules
pub mod config;
pub mod error;
pub mod plan;
pub mod runner;
pub mod ssh;

// Re-export common types for convenience
pub use config::DeployConfig;
pub use error::{Error, ErrorCode, Result};
pub use plan::{Operation, Plan};
pub use runner::{OperationReport, Runner};
