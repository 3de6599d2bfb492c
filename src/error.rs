//! Error types for loading the location table, decoding identity numbers
//! and reading a roster.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors while loading the address-code lookup.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("failed to read location table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed location table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons an identity number cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected 18 characters, got {0}")]
    InvalidLength(usize),

    #[error("unexpected character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },

    #[error("birth date {0} is not a calendar date")]
    InvalidBirthDate(String),

    #[error("birth date {birth} is after {as_of}")]
    BornInFuture {
        birth: chrono::NaiveDate,
        as_of: chrono::NaiveDate,
    },
}

/// Reasons a single `name----ID` roster entry is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("expected exactly one `----` separator")]
    MalformedPair,

    #[error("empty name")]
    EmptyName,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Fatal errors while reading a roster file.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
