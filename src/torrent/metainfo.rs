//! BitTorrent metainfo file parser.
//!
//! A torrent file (also known as a metainfo file) is a bencoded dictionary:
//!
//! - `announce`: URL of a tracker
//! - `announce-list`: tiers of tracker URLs, preferred over `announce`
//! - `info`: core metadata about the file(s), whose raw bytes are hashed into
//!   the info hash:
//!   - `name`: suggested filename/directory name
//!   - `piece length`: number of bytes per piece
//!   - `pieces`: concatenated SHA-1 hashes of all pieces
//!   - `length` (single file) or `files` (multiple files)
//!   - `private`: when 1, peers should only come from the listed trackers
//! - `url-list`, `comment`, `created by`, `creation date`, `encoding`: optional

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

use crate::bencode::{decode_document, DecoderLimits};

use super::announce::{read_trackers, read_url_list};
use super::error::TorrentError;
use super::info::{self, text_field, TorrentFile};
use super::info_hash::InfoHash;

/// Normalized metadata of a torrent descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentMetadata {
    /// Suggested name for the file or directory.
    pub name: String,
    /// SHA-1 over the raw bytes of the `info` dictionary.
    pub info_hash: InfoHash,
    /// Number of bytes per piece.
    pub piece_length: u64,
    /// Size of the final piece, which may be short.
    pub last_piece_length: u64,
    /// SHA-1 of each piece, in order.
    #[serde(rename = "pieces", serialize_with = "serialize_piece_hashes")]
    pub piece_hashes: Vec<[u8; 20]>,
    /// Files in the order they are laid out.
    pub files: Vec<TorrentFile>,
    /// Total size of all files combined.
    pub length: u64,
    /// Tracker URLs without duplicates, in first-seen order.
    pub announce: Vec<String>,
    /// The `announce-list` tiers as found, minus empty tiers.
    pub announce_tiers: Vec<Vec<String>>,
    /// Web seed URLs.
    pub url_list: Vec<String>,
    pub private: bool,
    pub comment: Option<String>,
    pub created_by: Option<String>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    pub encoding: Option<String>,
}

fn serialize_piece_hashes<S: Serializer>(
    hashes: &[[u8; 20]],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(hashes.iter().map(hex::encode))
}

/// Parse a torrent descriptor held in memory, using the default decoder limits.
pub fn parse(buffer: &[u8]) -> Result<TorrentMetadata, TorrentError> {
    parse_with_limits(buffer, DecoderLimits::default())
}

/// Parse a torrent descriptor held in memory.
///
/// # Errors
///
/// Returns an error if:
/// - The data is not valid bencode or exceeds `limits`
/// - The root has no `info` dictionary
/// - Required fields are missing (`name`, `piece length`, `pieces`, and
///   `length` or `files`) or have the wrong type
/// - The pieces do not match the total file length
pub fn parse_with_limits(
    buffer: &[u8],
    limits: DecoderLimits,
) -> Result<TorrentMetadata, TorrentError> {
    let document = decode_document(buffer, limits)?;
    let root = document
        .value
        .as_dict()
        .ok_or(TorrentError::MissingInfoDictionary)?;
    let (info_value, region) = match (root.get(b"info"), document.info_region) {
        (Some(value), Some(region)) => (value, region),
        _ => return Err(TorrentError::MissingInfoDictionary),
    };
    let info_dict = info_value.as_dict().ok_or(TorrentError::InvalidField("info"))?;

    let name = info::name(info_dict)?;
    let piece_length = info::piece_length(info_dict)?;
    let piece_hashes = info::piece_hashes(info_dict)?;
    let files = info::files(info_dict, &name)?;
    let length = files
        .iter()
        .try_fold(0u64, |total, file| total.checked_add(file.length))
        .ok_or(TorrentError::InvalidField("length"))?;
    info::check_piece_count(piece_hashes.len(), piece_length, length)?;

    let info_hash = InfoHash::from_region(buffer, region);
    let trackers = read_trackers(root);

    let metadata = TorrentMetadata {
        name,
        info_hash,
        piece_length,
        last_piece_length: last_piece_length(length, piece_length),
        piece_hashes,
        files,
        length,
        announce: trackers.announce,
        announce_tiers: trackers.tiers,
        url_list: read_url_list(root),
        private: info_dict.get(b"private").and_then(|v| v.as_integer()) == Some(1),
        comment: text_field(root, "comment"),
        created_by: text_field(root, "created by"),
        creation_date: root.get(b"creation date").and_then(|v| v.as_integer()),
        encoding: text_field(root, "encoding"),
    };

    debug!(
        "Parsed torrent {} ({}): {} files, {} pieces, {} trackers",
        metadata.name,
        metadata.info_hash,
        metadata.files.len(),
        metadata.piece_hashes.len(),
        metadata.announce.len()
    );
    Ok(metadata)
}

fn last_piece_length(length: u64, piece_length: u64) -> u64 {
    match length % piece_length {
        0 if length == 0 => 0,
        0 => piece_length,
        remainder => remainder,
    }
}

impl TorrentMetadata {
    pub fn piece_count(&self) -> usize {
        self.piece_hashes.len()
    }

    /// Size in bytes of the piece at `piece_index`, or `None` past the last piece.
    pub fn piece_size(&self, piece_index: usize) -> Option<u64> {
        if piece_index >= self.piece_count() {
            None
        } else if piece_index == self.piece_count() - 1 {
            Some(self.last_piece_length)
        } else {
            Some(self.piece_length)
        }
    }

    /// The file holding the byte at `offset` in the concatenated data.
    pub fn file_for_offset(&self, offset: u64) -> Option<&TorrentFile> {
        self.files.iter().find(|file| file.contains(offset))
    }
}

impl fmt::Display for TorrentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Info Hash: {}", self.info_hash)?;
        writeln!(f, "Length: {}", self.length)?;
        writeln!(f, "Piece Length: {}", self.piece_length)?;
        writeln!(f, "Piece Count: {}", self.piece_count())?;
        if self.private {
            writeln!(f, "Private: yes")?;
        }
        if let Some(comment) = &self.comment {
            writeln!(f, "Comment: {}", comment)?;
        }
        if let Some(created_by) = &self.created_by {
            writeln!(f, "Created By: {}", created_by)?;
        }
        if let Some(date) = self.creation_date {
            writeln!(f, "Creation Date: {}", date)?;
        }
        writeln!(f, "Trackers:")?;
        for url in &self.announce {
            writeln!(f, "  {}", url)?;
        }
        if !self.url_list.is_empty() {
            writeln!(f, "Web Seeds:")?;
            for url in &self.url_list {
                writeln!(f, "  {}", url)?;
            }
        }
        writeln!(f, "Files:")?;
        for file in &self.files {
            writeln!(
                f,
                "  {} ({} bytes at offset {})",
                file.display_path(),
                file.length,
                file.offset
            )?;
        }
        Ok(())
    }
}
