use std::path::PathBuf;
use thiserror::Error;

/// Player count or role set that cannot produce a valid deal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least {min} players are required, got {given}")]
    TooFewPlayers { given: usize, min: usize },
    #[error("{special} special roles do not fit into {players} players")]
    CapacityExceeded { special: usize, players: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("player name cannot be empty")]
    Empty,
    #[error("player name '{0}' contains characters not allowed in file names")]
    InvalidCharacters(String),
    #[error("player '{0}' is already in the game")]
    Duplicate(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
    #[error("expected a whole number, got '{0}'")]
    NotANumber(String),
    #[error("{players} players requested but {names} names given")]
    PlayerCountMismatch { players: usize, names: usize },
    #[error("label table has no entry for role '{0}'")]
    MissingLabel(&'static str),
    #[error("bad label table: {0}")]
    Labels(#[from] serde_json::Error),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
