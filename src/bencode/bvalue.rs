use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Display;

/// Represents a Bencode value as defined in the BitTorrent specification.
///
/// Bencode (pronounced like B-encode) supports four different types of values:
/// - Byte strings (raw bytes, not necessarily UTF-8)
/// - Integers
/// - Lists
/// - Dictionaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    /// An integer value, can be positive or negative
    /// Example: `i42e` represents 42
    Integer(i64),

    /// A byte string, prefixed with its length
    /// Example: `4:spam` represents "spam"
    String(Vec<u8>),

    /// A list of BValue elements
    /// Example: `l4:spami42ee` represents ["spam", 42]
    List(Vec<BValue>),

    /// A dictionary mapping byte strings to BValues, in the order the keys were read
    /// Example: `d3:bar4:spam3:fooi42ee` represents {"bar": "spam", "foo": 42}
    Dict(BDict),
}

/// Dictionary entries in first-seen key order.
///
/// Inserting a key that is already present replaces its value but keeps the
/// key at the position where it first appeared.
#[derive(Debug, Clone, Default)]
pub struct BDict {
    entries: Vec<(Vec<u8>, BValue)>,
    index: HashMap<Vec<u8>, usize>,
}

impl BDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the value it replaced if the key was already present.
    pub fn insert(&mut self, key: Vec<u8>, value: BValue) -> Option<BValue> {
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &BValue)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// The index is derived from the entries, so comparing entries is enough.
impl PartialEq for BDict {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for BDict {}

impl<K: Into<Vec<u8>>> FromIterator<(K, BValue)> for BDict {
    fn from_iter<I: IntoIterator<Item = (K, BValue)>>(iter: I) -> Self {
        let mut dict = BDict::new();
        for (key, value) in iter {
            dict.insert(key.into(), value);
        }
        dict
    }
}

impl BValue {
    /// Build a byte string value from text.
    pub fn string(s: &str) -> Self {
        BValue::String(s.as_bytes().to_vec())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::String(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// The byte string as text, replacing invalid UTF-8 sequences.
    pub fn as_str_lossy(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BDict> {
        match self {
            BValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict()?.get(key)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

fn is_printable(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| (32..=126).contains(&b))
}

fn display_bytes(bytes: &[u8]) -> String {
    if is_printable(bytes) {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        hex::encode(bytes)
    }
}

impl Display for BValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BValue::Integer(n) => write!(f, "{}", n),
            BValue::String(s) => write!(f, "\"{}\"", display_bytes(s)),
            BValue::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            BValue::Dict(dict) => {
                write!(f, "{{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\":{}", display_bytes(key), value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&BValue> for serde_json::Value {
    fn from(value: &BValue) -> Self {
        match value {
            BValue::Integer(n) => serde_json::Value::Number((*n).into()),
            BValue::String(s) => serde_json::Value::String(display_bytes(s)),
            BValue::List(arr) => serde_json::Value::Array(arr.iter().map(|v| v.into()).collect()),
            BValue::Dict(dict) => {
                let obj = dict
                    .iter()
                    .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), v.into()))
                    .collect();
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl From<i64> for BValue {
    fn from(n: i64) -> Self {
        BValue::Integer(n)
    }
}

impl From<&str> for BValue {
    fn from(s: &str) -> Self {
        BValue::string(s)
    }
}

impl From<Vec<BValue>> for BValue {
    fn from(list: Vec<BValue>) -> Self {
        BValue::List(list)
    }
}

impl From<BDict> for BValue {
    fn from(dict: BDict) -> Self {
        BValue::Dict(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut dict = BDict::new();
        assert_eq!(dict.insert(b"b".to_vec(), BValue::Integer(1)), None);
        assert_eq!(dict.insert(b"a".to_vec(), BValue::Integer(2)), None);
        assert_eq!(
            dict.insert(b"b".to_vec(), BValue::Integer(3)),
            Some(BValue::Integer(1))
        );

        let keys: Vec<&[u8]> = dict.keys().collect();
        assert_eq!(keys, vec![b"b".as_slice(), b"a".as_slice()]);
        assert_eq!(dict.get(b"b"), Some(&BValue::Integer(3)));
        assert_eq!(dict.len(), 2);
        assert!(dict.contains_key(b"a"));
        assert!(!dict.contains_key(b"c"));
    }

    #[test]
    fn test_from_conversions() {
        let dict: BDict = [("n", BValue::from(7i64)), ("s", BValue::from("x"))]
            .into_iter()
            .collect();
        let value = BValue::from(vec![BValue::from(dict)]);
        assert_eq!(value.to_string(), "[{\"n\":7,\"s\":\"x\"}]");
    }

    #[test]
    fn test_display_hexes_binary_strings() {
        let value = BValue::List(vec![
            BValue::string("spam"),
            BValue::String(vec![0x00, 0xff]),
            BValue::Integer(-3),
        ]);
        assert_eq!(value.to_string(), "[\"spam\",\"00ff\",-3]");
    }

    #[test]
    fn test_to_json() {
        let dict: BDict = [
            ("name", BValue::string("a.txt")),
            ("length", BValue::Integer(10)),
            ("tags", BValue::List(vec![BValue::string("x")])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            BValue::Dict(dict).to_json(),
            json!({"name": "a.txt", "length": 10, "tags": ["x"]})
        );
    }

    #[test]
    fn test_lossy_text() {
        let value = BValue::String(vec![b'o', b'k', 0xff]);
        assert_eq!(value.as_str_lossy().unwrap(), "ok\u{fffd}");
        assert!(BValue::Integer(1).as_str_lossy().is_none());
    }
}
