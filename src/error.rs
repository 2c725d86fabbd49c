// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttendanceError {
    /// A history record is missing a field or has the wrong shape. Fatal to the load.
    #[error("malformed history record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Every message in the group is flagged BAD, so there is no day to pin the op to.
    #[error("cannot derive operation date: all {messages} messages are flagged BAD")]
    UndatedOperation { messages: usize },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = AttendanceError> = std::result::Result<T, E>;
