//! Bencode encoder used to build test fixtures.
//!
//! Dictionaries are written in their stored key order, not sorted, so tests can
//! produce descriptors whose bytes differ from a canonical re-encoding.

use crate::bencode::bvalue::{BDict, BValue};

/// An encoder for converting values into Bencode format.
pub struct Encoder {
    output: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { output: Vec::new() }
    }

    pub fn encode(mut self, value: &BValue) -> Vec<u8> {
        self.encode_value(value);
        self.output
    }

    fn encode_value(&mut self, value: &BValue) {
        match value {
            BValue::Integer(n) => self.encode_integer(*n),
            BValue::String(s) => self.encode_string(s),
            BValue::List(list) => self.encode_list(list),
            BValue::Dict(dict) => self.encode_dict(dict),
        }
    }

    /// Encodes an integer in the format: i<number>e
    fn encode_integer(&mut self, n: i64) {
        self.output.push(b'i');
        self.output.extend_from_slice(n.to_string().as_bytes());
        self.output.push(b'e');
    }

    /// Encodes a string in the format: <length>:<string>
    fn encode_string(&mut self, s: &[u8]) {
        self.output.extend_from_slice(s.len().to_string().as_bytes());
        self.output.push(b':');
        self.output.extend_from_slice(s);
    }

    /// Encodes a list in the format: l<bencoded values>e
    fn encode_list(&mut self, list: &[BValue]) {
        self.output.push(b'l');
        for item in list {
            self.encode_value(item);
        }
        self.output.push(b'e');
    }

    /// Encodes a dictionary in the format: d<bencoded string><bencoded value>e
    fn encode_dict(&mut self, dict: &BDict) {
        self.output.push(b'd');
        for (key, value) in dict.iter() {
            self.encode_string(key);
            self.encode_value(value);
        }
        self.output.push(b'e');
    }
}

pub fn encode(value: &BValue) -> Vec<u8> {
    Encoder::new().encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&BValue::Integer(42)), b"i42e");
        assert_eq!(encode(&BValue::Integer(-42)), b"i-42e");
        assert_eq!(encode(&BValue::string("spam")), b"4:spam");
        assert_eq!(encode(&BValue::string("")), b"0:");
    }

    #[test]
    fn test_encode_dict_keeps_order() {
        let dict: BDict = [("foo", BValue::Integer(42)), ("bar", BValue::string("spam"))]
            .into_iter()
            .collect();
        assert_eq!(encode(&BValue::Dict(dict)), b"d3:fooi42e3:bar4:spame");
    }
}
