use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisguiseError {
    #[error("Reference sequence for '{name}' has no frames")]
    EmptySequence { name: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),

    #[error("Duplicate enemy name: {0}")]
    DuplicateEnemy(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DisguiseError>;
