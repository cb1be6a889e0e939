use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("could not open \"{}\" for writing: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed writing \"{}\": {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: expected section \"{expected}\"")]
    MissingSection { line: usize, expected: &'static str },

    #[error("line {line}: missing header field \"{field}\"")]
    MissingHeader { line: usize, field: &'static str },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount { line: usize, expected: usize, found: usize },

    #[error("line {line}: invalid integer \"{value}\"")]
    BadInteger { line: usize, value: String },

    #[error("unsupported record version {0}")]
    Version(i32),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config \"{}\": {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config \"{}\": {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("unknown command \"{0}\"")]
    Unknown(String),
}
