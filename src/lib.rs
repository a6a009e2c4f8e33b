//! Decode torrent descriptors into normalized, application-ready metadata.
//!
//! ```
//! let bytes = b"d8:announce23:http://tracker/announce4:infod6:lengthi3e4:name5:a.txt12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
//! let torrent = parse_torrent::parse(bytes).unwrap();
//! assert_eq!(torrent.name, "a.txt");
//! assert_eq!(torrent.announce, vec!["http://tracker/announce"]);
//! assert_eq!(torrent.files[0].length, 3);
//! ```

pub mod bencode;
pub mod torrent;

pub use bencode::{BValue, BencodeError, ByteRegion, DecoderLimits};
pub use torrent::{parse, parse_with_limits, InfoHash, TorrentError, TorrentFile, TorrentMetadata};
