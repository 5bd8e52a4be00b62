//! Order-preserving JSON codec for [`OrderedMap`].
//!
//! ```
//! use ordered_json::{json, Value};
//!
//! let map = json::from_str(r#"{"x":{"y":[1,2,"z"]},"w":true}"#).unwrap();
//! assert_eq!(map.keys(), ["x", "w"]);
//! assert_eq!(map.get("w"), Value::Bool(true));
//! assert_eq!(json::to_string(&map).unwrap(), r#"{"x":{"y":[1,2,"z"]},"w":true}"#);
//! ```

mod decoder;
mod encoder;
mod error;
mod options;

use std::str::FromStr;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use error::{Container, EncodeError, Error, ParseError, Result};
pub use options::{DecodeOptions, DuplicateKeys, EncodeOptions, DEFAULT_MAX_DEPTH};

use crate::OrderedMap;

/// Decodes a JSON object with default options.
pub fn from_slice(input: &[u8]) -> Result<OrderedMap, ParseError> {
    JsonDecoder::new(input).decode()
}

pub fn from_slice_with(input: &[u8], options: DecodeOptions) -> Result<OrderedMap, ParseError> {
    JsonDecoder::new(input).with_options(options).decode()
}

pub fn from_str(input: &str) -> Result<OrderedMap, ParseError> {
    from_slice(input.as_bytes())
}

/// Encodes `map` as a compact JSON object with default options.
pub fn to_vec(map: &OrderedMap) -> Result<Vec<u8>, EncodeError> {
    JsonEncoder::new().encode(map)
}

pub fn to_vec_with(map: &OrderedMap, options: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    JsonEncoder::new().with_options(options).encode(map)
}

pub fn to_string(map: &OrderedMap) -> Result<String, EncodeError> {
    let bytes = to_vec(map)?;
    String::from_utf8(bytes).map_err(|_| EncodeError::InvalidUtf8)
}

impl OrderedMap {
    /// Shorthand for [`json::from_slice`](from_slice).
    pub fn from_json(input: &[u8]) -> Result<Self, ParseError> {
        from_slice(input)
    }

    /// Shorthand for [`json::to_vec`](to_vec).
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        to_vec(self)
    }
}

impl FromStr for OrderedMap {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn round_trip_preserves_bytes() {
        let input = r#"{"z":1,"a":{"m":[1.50,-0,1e400,"s",null,{"k":false}]},"e":{}}"#;
        let map = from_str(input).unwrap();
        assert_eq!(to_string(&map).unwrap(), input);
    }

    #[test]
    fn to_string_keeps_non_ascii_text_intact() {
        let map = OrderedMap::new();
        map.set("ключ", "日本語 😀");
        map.set("ctl", "\u{7f}\u{1}");
        assert_eq!(
            to_string(&map).unwrap(),
            "{\"ключ\":\"日本語 😀\",\"ctl\":\"\u{7f}\\u0001\"}"
        );
    }

    #[test]
    fn whitespace_is_not_preserved() {
        let map = from_str("{ \"a\" : [ 1 , 2 ] }").unwrap();
        assert_eq!(to_string(&map).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn from_str_trait() {
        let map: OrderedMap = r#"{"b":1,"a":2}"#.parse().unwrap();
        assert_eq!(map.keys(), vec!["b", "a"]);
        assert!("nope".parse::<OrderedMap>().is_err());
    }

    #[test]
    fn method_shorthands() {
        let map = OrderedMap::from_json(br#"{"k":"v"}"#).unwrap();
        assert_eq!(map.get("k"), Value::from("v"));
        assert_eq!(map.to_json().unwrap(), br#"{"k":"v"}"#.to_vec());
    }

    #[test]
    fn with_options() {
        let opts = DecodeOptions::default().with_duplicate_keys(DuplicateKeys::Reject);
        assert!(from_slice_with(br#"{"a":1,"a":1}"#, opts).is_err());

        let map = from_str(r#"{"a":{"b":{}}}"#).unwrap();
        assert!(to_vec_with(&map, EncodeOptions::default().with_max_depth(2)).is_err());
        assert!(to_vec_with(&map, EncodeOptions::default().with_max_depth(3)).is_ok());
    }
}
