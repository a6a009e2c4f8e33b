use serde::{Serialize, Serializer};
use sha1::digest::Output;
use sha1::{Digest, Sha1};
use std::fmt;

use crate::bencode::ByteRegion;

/// SHA-1 of the raw bencoded `info` dictionary; identifies the content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Hash the bytes `region` covers in the buffer it was decoded from.
    pub fn from_region(buffer: &[u8], region: ByteRegion) -> Self {
        Self(digest_region::<Sha1>(buffer, region).into())
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Digest the bytes `region` covers using any `Digest` implementation.
///
/// Panics if the region lies outside `buffer`.
pub fn digest_region<D: Digest>(buffer: &[u8], region: ByteRegion) -> Output<D> {
    let mut hasher = D::new();
    hasher.update(region.slice(buffer));
    hasher.finalize()
}

impl From<[u8; 20]> for InfoHash {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
