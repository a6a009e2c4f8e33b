use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when turning descriptor bytes into [`TorrentMetadata`](super::TorrentMetadata).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TorrentError {
    /// The bytes are not valid bencode, or exceed the decoder limits.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The root value is not a dictionary with an `info` entry.
    #[error("missing info dictionary")]
    MissingInfoDictionary,

    /// A required field is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong type or an out-of-range value.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The piece fingerprints cannot describe the file layout.
    #[error("malformed pieces: {0}")]
    MalformedPieces(String),
}
