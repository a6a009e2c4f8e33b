mod announce;
mod error;
mod info;
mod info_hash;
mod metainfo;

pub use error::TorrentError;
pub use info::{TorrentFile, PIECE_HASH_LEN};
pub use info_hash::{digest_region, InfoHash};
pub use metainfo::{parse, parse_with_limits, TorrentMetadata};
