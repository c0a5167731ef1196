use std::{error::Error, io::Read};

use serde::Deserialize;
use serde_json::{Map, Value};

const HEX: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Percent-encodes `s` for use as a single URL path segment, keeping only
/// the RFC 3986 unreserved characters.
pub fn encode(s: &str) -> String {
    let mut res = String::new();
    for c in s.bytes() {
        match c as char {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '.' | '_' | '~' => res.push(c as char),
            _ => {
                res.push('%');
                res.push(HEX[(c >> 4) as usize]);
                res.push(HEX[(c & 15) as usize]);
            }
        }
    }
    res
}

/// Converts a JSON number into a count, truncating any fractional part.
/// Negative and non-finite values are not counts.
pub fn to_count(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    return Some(value.trunc() as u64);
}

/// Decodes the first JSON value of `reader`, which must be an object.
/// Bytes after that value are left unread.
pub fn decode_object<R: Read>(reader: R) -> Result<Map<String, Value>, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    return Map::deserialize(&mut de);
}

/// Describes a transport failure without the request URL, whose query string
/// may carry a credential.
pub fn describe_transport(err: &ureq::Transport) -> String {
    let mut res = err.kind().to_string();
    if let Some(message) = err.message() {
        res.push_str(": ");
        res.push_str(message);
    }
    if let Some(source) = err.source() {
        res.push_str(": ");
        res.push_str(source.to_string().as_str());
    }
    res
}

#[test]
fn test_encode() {
    let values: Vec<(&str, &str)> = vec![
        ("jack", "jack"),
        ("some_user-1.0~", "some_user-1.0~"),
        ("Ladies + Gentlemen", "Ladies%20%2B%20Gentlemen"),
        ("../admin", "..%2Fadmin"),
        ("who?am=i", "who%3Fam%3Di"),
        ("☃", "%E2%98%83"),
    ];
    for (input, expected) in values {
        assert_eq!(encode(input), expected);
    }
}

#[test]
fn test_to_count() {
    assert_eq!(to_count(137.0), Some(137));
    assert_eq!(to_count(0.0), Some(0));
    assert_eq!(to_count(42.9), Some(42));
    assert_eq!(to_count(-1.0), None);
    assert_eq!(to_count(f64::NAN), None);
    assert_eq!(to_count(f64::INFINITY), None);
}

#[test]
fn test_decode_object_ignores_trailing_bytes() {
    let body = decode_object(r#"{"summary":{"total_count":1}} trailing"#.as_bytes()).unwrap();
    assert!(body.contains_key("summary"));
}

#[test]
fn test_decode_object_rejects_non_objects() {
    assert!(decode_object("[1, 2]".as_bytes()).is_err());
    assert!(decode_object("137".as_bytes()).is_err());
    assert!(decode_object("".as_bytes()).is_err());
    assert!(decode_object("<html>".as_bytes()).is_err());
}
