//! Reading the `info` dictionary: piece fingerprints and file layout.
//!
//! A single-file descriptor carries `length`; a multi-file one carries
//! `files`, each with a `path` (list of segments) and a `length`. Files are
//! laid end to end, so each file's `offset` is the sum of the lengths before it.

use serde::Serialize;

use crate::bencode::{BDict, BValue};

use super::error::TorrentError;

pub const PIECE_HASH_LEN: usize = 20;

/// A file within the torrent, placed in the concatenation of all files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentFile {
    /// Path segments; for a single-file torrent this is just the torrent name.
    pub path: Vec<String>,
    /// Size of the file in bytes.
    pub length: u64,
    /// Byte offset of the file's first byte within the torrent's data.
    pub offset: u64,
}

impl TorrentFile {
    /// Path segments joined with `/`.
    pub fn display_path(&self) -> String {
        self.path.join("/")
    }

    /// Whether the absolute byte `offset` falls inside this file.
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.offset && offset - self.offset < self.length
    }
}

/// Read text, preferring the `<key>.utf-8` variant some creators add.
pub(crate) fn text_field(dict: &BDict, key: &'static str) -> Option<String> {
    let utf8_key = format!("{key}.utf-8");
    dict.get(utf8_key.as_bytes())
        .or_else(|| dict.get(key.as_bytes()))
        .and_then(BValue::as_str_lossy)
        .map(|s| s.into_owned())
}

fn non_negative(value: &BValue, field: &'static str) -> Result<u64, TorrentError> {
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or(TorrentError::InvalidField(field))
}

pub(crate) fn name(info: &BDict) -> Result<String, TorrentError> {
    match info.get(b"name.utf-8").or_else(|| info.get(b"name")) {
        Some(value) => value
            .as_str_lossy()
            .map(|s| s.into_owned())
            .ok_or(TorrentError::InvalidField("name")),
        None => Err(TorrentError::MissingField("name")),
    }
}

pub(crate) fn piece_length(info: &BDict) -> Result<u64, TorrentError> {
    let value = info
        .get(b"piece length")
        .ok_or(TorrentError::MissingField("piece length"))?;
    match non_negative(value, "piece length")? {
        0 => Err(TorrentError::InvalidField("piece length")),
        n => Ok(n),
    }
}

/// Split the concatenated `pieces` string into 20-byte fingerprints.
pub(crate) fn piece_hashes(info: &BDict) -> Result<Vec<[u8; PIECE_HASH_LEN]>, TorrentError> {
    let pieces = info
        .get(b"pieces")
        .ok_or(TorrentError::MissingField("pieces"))?
        .as_bytes()
        .ok_or(TorrentError::InvalidField("pieces"))?;

    if pieces.len() % PIECE_HASH_LEN != 0 {
        return Err(TorrentError::MalformedPieces(format!(
            "{} bytes is not a multiple of {}",
            pieces.len(),
            PIECE_HASH_LEN
        )));
    }

    Ok(pieces
        .chunks_exact(PIECE_HASH_LEN)
        .map(|chunk| {
            let mut hash = [0u8; PIECE_HASH_LEN];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect())
}

/// The file layout, either the single-file or the multi-file shape.
pub(crate) fn files(info: &BDict, name: &str) -> Result<Vec<TorrentFile>, TorrentError> {
    if let Some(length) = info.get(b"length") {
        return Ok(vec![TorrentFile {
            path: vec![name.to_string()],
            length: non_negative(length, "length")?,
            offset: 0,
        }]);
    }

    let entries = info
        .get(b"files")
        .ok_or(TorrentError::MissingField("length-or-files"))?
        .as_list()
        .ok_or(TorrentError::InvalidField("files"))?;

    let mut files = Vec::with_capacity(entries.len());
    let mut offset = 0u64;
    for entry in entries {
        let entry = entry.as_dict().ok_or(TorrentError::InvalidField("files"))?;
        let length = non_negative(
            entry
                .get(b"length")
                .ok_or(TorrentError::MissingField("length"))?,
            "length",
        )?;
        let path = file_path(entry)?;

        files.push(TorrentFile {
            path,
            length,
            offset,
        });
        offset = offset
            .checked_add(length)
            .ok_or(TorrentError::InvalidField("length"))?;
    }

    Ok(files)
}

fn file_path(entry: &BDict) -> Result<Vec<String>, TorrentError> {
    let segments = entry
        .get(b"path.utf-8")
        .or_else(|| entry.get(b"path"))
        .ok_or(TorrentError::MissingField("path"))?
        .as_list()
        .ok_or(TorrentError::InvalidField("path"))?;

    if segments.is_empty() {
        return Err(TorrentError::InvalidField("path"));
    }

    segments
        .iter()
        .map(|segment| {
            segment
                .as_str_lossy()
                .map(|s| s.into_owned())
                .ok_or(TorrentError::InvalidField("path"))
        })
        .collect()
}

/// Check that the fingerprints cover `total_length` bytes with the last piece possibly short.
pub(crate) fn check_piece_count(
    piece_count: usize,
    piece_length: u64,
    total_length: u64,
) -> Result<(), TorrentError> {
    let expected = total_length.div_ceil(piece_length);
    if piece_count as u64 != expected {
        return Err(TorrentError::MalformedPieces(format!(
            "{} pieces of {} bytes cannot hold {} bytes (expected {} pieces)",
            piece_count, piece_length, total_length, expected
        )));
    }
    Ok(())
}
