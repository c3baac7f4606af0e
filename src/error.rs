use std::path::PathBuf;

/// Errors decoding a packed board register.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell {index} holds invalid code {code}")]
    InvalidCellCode { index: usize, code: u8 },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors parsing or checking a host script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    BadArgument { line: usize, message: String },

    #[error("line {line}: expected {expected}, read {actual}")]
    ExpectationFailed {
        line: usize,
        expected: u8,
        actual: u8,
    },
}
