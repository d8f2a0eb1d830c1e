pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod mount;
pub mod probe;
pub mod types;

pub use check::{evaluate, run_check, CHECK_NAME};
pub use config::model::CheckConfig;
pub use error::{CheckError, Result};
pub use types::{MountResult, OverallResult, Status};
