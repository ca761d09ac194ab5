use thiserror::Error;

use crate::core::types::PlayerId;

#[derive(Error, Debug)]
pub enum PerceptionError {
    #[error("A perception session is already open")]
    SessionAlreadyOpen,

    #[error("Player not tracked: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PerceptionError>;
