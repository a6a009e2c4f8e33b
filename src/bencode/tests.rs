//! Decoder checks against `serde_bencode` as a known-good encoder.

use std::collections::HashMap;

use serde_bencode::value::Value;

use super::*;

/// Mirror a reference value into our tree. The reference encoder writes
/// dictionary keys sorted, so the mirrored dictionary is sorted too.
fn mirror(value: &Value) -> BValue {
    match value {
        Value::Int(n) => BValue::Integer(*n),
        Value::Bytes(b) => BValue::String(b.clone()),
        Value::List(list) => BValue::List(list.iter().map(mirror).collect()),
        Value::Dict(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            BValue::Dict(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), mirror(v)))
                    .collect(),
            )
        }
    }
}

fn assert_decodes_like_reference(value: Value) {
    let encoded = serde_bencode::to_bytes(&value).unwrap();
    assert_eq!(Bencode::decode(&encoded).unwrap(), mirror(&value));
}

fn bytes(s: &str) -> Value {
    Value::Bytes(s.as_bytes().to_vec())
}

#[test]
fn test_reference_scalars() {
    for n in [0, 1, -1, 42, i64::MAX, i64::MIN + 1] {
        assert_decodes_like_reference(Value::Int(n));
    }
    assert_decodes_like_reference(bytes(""));
    assert_decodes_like_reference(bytes("spam"));
    assert_decodes_like_reference(Value::Bytes((0..=255).collect()));
}

#[test]
fn test_reference_nested() {
    let mut inner = HashMap::new();
    inner.insert(b"z".to_vec(), Value::Int(26));
    inner.insert(b"a".to_vec(), Value::List(vec![bytes("x"), Value::Int(-7)]));

    let mut outer = HashMap::new();
    outer.insert(b"piece length".to_vec(), Value::Int(16384));
    outer.insert(b"info".to_vec(), Value::Dict(inner));
    outer.insert(b"empty".to_vec(), Value::Dict(HashMap::new()));
    outer.insert(
        b"announce-list".to_vec(),
        Value::List(vec![Value::List(vec![bytes("udp://a")]), Value::List(vec![])]),
    );

    assert_decodes_like_reference(Value::Dict(outer));
}

#[test]
fn test_decode_prefix_within_larger_buffer() {
    let encoded = serde_bencode::to_bytes(&Value::List(vec![bytes("ab"), Value::Int(3)])).unwrap();
    let mut buffer = b"junk".to_vec();
    buffer.extend_from_slice(&encoded);
    buffer.extend_from_slice(b"more junk");

    let (value, consumed) = Bencode::decode_prefix(&buffer, 4).unwrap();
    assert_eq!(consumed, encoded.len());
    assert_eq!(
        value,
        BValue::List(vec![BValue::string("ab"), BValue::Integer(3)])
    );
    assert_eq!(
        Bencode::decode(&buffer[4..]),
        Err(BencodeError::TrailingData(encoded.len()))
    );
}

#[test]
fn test_decode_with_limits() {
    let limits = DecoderLimits {
        max_depth: 1,
        max_input_len: 1024,
    };
    assert!(Bencode::decode_with_limits(b"li1ee", limits).is_ok());
    assert!(matches!(
        Bencode::decode_with_limits(b"lli1eee", limits),
        Err(BencodeError::RecursionLimitExceeded { limit: 1, .. })
    ));
}
