use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `bulkrep`.
///
/// Configuration problems and I/O failures both end the run; nothing is
/// retried or recovered per file.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An I/O error tied to a specific file.
    #[error("IO error on {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An error that occurred while parsing a TOML configuration file.
    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An error that occurred while parsing a YAML configuration file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from the `walkdir` crate.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// An error related to persisting a temporary file over the original.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),

    /// The logger could not be installed.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A convenient type alias for `Result<T, bulkrep::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }

    /// `true` for errors caused by the configuration document rather than
    /// the files being rewritten.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Toml(_) | Error::Yaml(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
