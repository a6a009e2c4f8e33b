//! Bencode decoding ([BEP-3](http://www.bittorrent.org/beps/bep_0003.html#bencoding)).
//!
//! - Strings are length-prefixed base10 followed by a colon and the string
//! - Integers are 'i' followed by the number in base10 followed by 'e'
//! - Lists are 'l' followed by their elements followed by 'e'
//! - Dictionaries are 'd' followed by alternating keys and values followed by 'e'
//!
//! Decoding is strict about the grammar (no leading zeros, no trailing bytes)
//! and lenient about dictionaries: keys need not be sorted, and a repeated key
//! keeps its first position but takes its last value.

mod bvalue;
mod decoder;
#[cfg(test)]
pub(crate) mod encoder;
mod error;
mod region;

pub use bvalue::{BDict, BValue};
pub use decoder::{
    decode_document, Decoder, DecoderLimits, Document, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN,
};
pub use error::BencodeError;
pub use region::ByteRegion;

/// Bencode decoder
#[derive(Debug, Clone, Copy)]
pub struct Bencode;

impl Bencode {
    /// Decode a buffer holding exactly one bencoded value.
    pub fn decode(input: &[u8]) -> Result<BValue, BencodeError> {
        Self::decode_with_limits(input, DecoderLimits::default())
    }

    pub fn decode_with_limits(input: &[u8], limits: DecoderLimits) -> Result<BValue, BencodeError> {
        Decoder::with_limits(input, limits).parse()
    }

    /// Decode one value starting at `offset`, returning it with the number of bytes it used.
    ///
    /// Bytes after the value are left alone; the caller tracks its own position.
    pub fn decode_prefix(input: &[u8], offset: usize) -> Result<(BValue, usize), BencodeError> {
        let mut decoder = Decoder::new(input).starting_at(offset);
        let value = decoder.parse_prefix()?;
        Ok((value, decoder.position() - offset))
    }
}

#[cfg(test)]
mod tests;
