use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("Cannot read input directory {}: {source}", .path.display())]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output file {}: {source}", .path.display())]
    OutputCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load beatmap {}: {message}", .path.display())]
    BeatmapLoadFailed { path: PathBuf, message: String },

    #[error("Failed to calculate {} with {mods}: {message}", .path.display())]
    CalculationFailed {
        path: PathBuf,
        mods: String,
        message: String,
    },

    #[error("Unknown mod acronym: {0}")]
    UnknownMod(String),

    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Unsupported game mode: {0}")]
    UnsupportedMode(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Malformed CSV at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}
