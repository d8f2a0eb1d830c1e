use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    MountTable(String),
    #[error("{0}")]
    Partitions(String),
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse config: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;

impl CheckError {
    pub fn message(msg: impl Into<String>) -> Self {
        CheckError::Message(msg.into())
    }
}

impl From<ConfigError> for CheckError {
    fn from(err: ConfigError) -> Self {
        CheckError::Config(err)
    }
}
