use thiserror::Error;

/// Errors raised while decoding bencoded bytes.
///
/// Every structural variant carries the byte offset at which decoding failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BencodeError {
    #[error("malformed string length at byte {0}")]
    MalformedLength(usize),

    #[error("malformed integer at byte {0}")]
    MalformedInteger(usize),

    #[error("list starting at byte {0} is not terminated")]
    UnterminatedList(usize),

    #[error("dictionary starting at byte {0} is not terminated")]
    UnterminatedMap(usize),

    #[error("dictionary key at byte {0} is not a byte string")]
    NonStringKey(usize),

    #[error("unknown type tag 0x{tag:02x} at byte {position}")]
    UnknownTypeTag { tag: u8, position: usize },

    #[error("input truncated at byte {0}")]
    TruncatedInput(usize),

    #[error("trailing data after value at byte {0}")]
    TrailingData(usize),

    #[error("input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("nesting deeper than {limit} levels at byte {position}")]
    RecursionLimitExceeded { limit: usize, position: usize },
}
