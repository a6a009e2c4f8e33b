//! Recursive-descent bencode decoder over a borrowed byte buffer.
//!
//! The decoder walks the input once. While it reads the root dictionary it
//! also records where the value stored under the `info` key begins and ends,
//! so callers can hash the original bytes instead of a re-encoding.

use tracing::{debug, error, warn};

use super::bvalue::{BDict, BValue};
use super::error::BencodeError;
use super::region::ByteRegion;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_INPUT_LEN: usize = 16 * 1024 * 1024;

const INFO_KEY: &[u8] = b"info";

type Result<T> = std::result::Result<T, BencodeError>;

/// Bounds on the work a single decode may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderLimits {
    /// Maximum number of nested lists and dictionaries.
    pub max_depth: usize,
    /// Maximum size of the whole input buffer in bytes.
    pub max_input_len: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

/// A decoded root value together with the span of its `info` entry, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub value: BValue,
    pub info_region: Option<ByteRegion>,
}

pub struct Decoder<'a> {
    input: &'a [u8],
    position: usize,
    depth: usize,
    limits: DecoderLimits,
    info_region: Option<ByteRegion>,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_limits(input, DecoderLimits::default())
    }

    pub fn with_limits(input: &'a [u8], limits: DecoderLimits) -> Self {
        Self {
            input,
            position: 0,
            depth: 0,
            limits,
            info_region: None,
        }
    }

    /// Start decoding at `offset` instead of the beginning of the buffer.
    pub fn starting_at(mut self, offset: usize) -> Self {
        self.position = offset;
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Span of the value stored under `info` in the root dictionary, once decoded.
    pub fn info_region(&self) -> Option<ByteRegion> {
        self.info_region
    }

    /// Decode exactly one value that must span the rest of the buffer.
    pub fn parse(&mut self) -> Result<BValue> {
        let value = self.parse_prefix()?;
        if self.position != self.input.len() {
            return Err(BencodeError::TrailingData(self.position));
        }
        Ok(value)
    }

    /// Decode exactly one value, leaving the position just past it.
    pub fn parse_prefix(&mut self) -> Result<BValue> {
        if self.input.len() > self.limits.max_input_len {
            return Err(BencodeError::InputTooLarge {
                len: self.input.len(),
                limit: self.limits.max_input_len,
            });
        }
        self.parse_value()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn parse_value(&mut self) -> Result<BValue> {
        match self.peek() {
            Some(b'i') => Ok(BValue::Integer(self.parse_integer()?)),
            Some(b'l') => self.parse_list(),
            Some(b'd') => self.parse_dict(),
            Some(b'0'..=b'9') => Ok(BValue::String(self.parse_string()?)),
            Some(tag) => {
                error!(
                    "Unhandled encoded value at position {}: 0x{:02x}",
                    self.position, tag
                );
                Err(BencodeError::UnknownTypeTag {
                    tag,
                    position: self.position,
                })
            }
            None => Err(BencodeError::TruncatedInput(self.position)),
        }
    }

    /// Advance over a run of ASCII digits and return it.
    fn consume_digits(&mut self) -> &'a [u8] {
        let input = self.input;
        let start = self.position;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.position += 1;
        }
        &input[start..self.position]
    }

    fn parse_integer(&mut self) -> Result<i64> {
        let start = self.position;
        let malformed = BencodeError::MalformedInteger(start);
        self.position += 1; // consume 'i'

        let negative = self.peek() == Some(b'-');
        if negative {
            self.position += 1;
        }
        let digits = self.consume_digits();
        if self.peek() != Some(b'e') {
            return Err(malformed);
        }
        if digits.is_empty() || (digits[0] == b'0' && (digits.len() > 1 || negative)) {
            return Err(malformed);
        }

        let text = std::str::from_utf8(&self.input[start + 1..self.position])
            .map_err(|_| malformed.clone())?;
        let value = text.parse::<i64>().map_err(|_| malformed)?;
        self.position += 1; // consume 'e'
        Ok(value)
    }

    fn parse_length(&mut self) -> Result<usize> {
        let start = self.position;
        let digits = self.consume_digits();
        match self.peek() {
            Some(b':') => {}
            Some(_) => return Err(BencodeError::MalformedLength(start)),
            None => return Err(BencodeError::TruncatedInput(self.position)),
        }
        if digits.is_empty() || (digits[0] == b'0' && digits.len() > 1) {
            return Err(BencodeError::MalformedLength(start));
        }

        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(BencodeError::MalformedLength(start))?;
        self.position += 1; // consume ':'
        Ok(len)
    }

    fn parse_string(&mut self) -> Result<Vec<u8>> {
        let len = self.parse_length()?;
        let start = self.position;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(BencodeError::TruncatedInput(self.input.len()))?;
        self.position = end;
        Ok(self.input[start..end].to_vec())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(BencodeError::RecursionLimitExceeded {
                limit: self.limits.max_depth,
                position: self.position,
            });
        }
        Ok(())
    }

    fn parse_list(&mut self) -> Result<BValue> {
        let start = self.position;
        self.enter()?;
        self.position += 1; // consume 'l'

        let mut values = Vec::new();
        loop {
            match self.peek() {
                Some(b'e') => break,
                Some(_) => values.push(self.parse_value()?),
                None => return Err(BencodeError::UnterminatedList(start)),
            }
        }

        self.position += 1; // consume 'e'
        self.depth -= 1;
        Ok(BValue::List(values))
    }

    fn parse_dict(&mut self) -> Result<BValue> {
        let start = self.position;
        let root = self.depth == 0;
        self.enter()?;
        self.position += 1; // consume 'd'

        let mut dict = BDict::new();
        loop {
            match self.peek() {
                Some(b'e') => break,
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(BencodeError::NonStringKey(self.position)),
                None => return Err(BencodeError::UnterminatedMap(start)),
            }

            let key_start = self.position;
            let key = self.parse_string()?;
            if self.peek().is_none() {
                return Err(BencodeError::UnterminatedMap(start));
            }

            let value_start = self.position;
            let value = self.parse_value()?;
            if root && key == INFO_KEY {
                let region = ByteRegion::new(value_start, self.position);
                debug!("info dictionary spans bytes {}..{}", region.start(), region.end());
                self.info_region = Some(region);
            }

            if dict.insert(key, value).is_some() {
                warn!(
                    "Duplicate dictionary key at position {}, keeping the last value",
                    key_start
                );
            }
        }

        self.position += 1; // consume 'e'
        self.depth -= 1;
        Ok(BValue::Dict(dict))
    }
}

/// Decode a whole buffer and report where its root `info` entry lies.
pub fn decode_document(input: &[u8], limits: DecoderLimits) -> Result<Document> {
    let mut decoder = Decoder::with_limits(input, limits);
    let value = decoder.parse()?;
    Ok(Document {
        value,
        info_region: decoder.info_region(),
    })
}
