//! `JsonEncoder`: writes an [`OrderedMap`] tree as compact JSON.
//!
//! Members are written in insertion order and numbers as their stored
//! lexeme, so `decode(encode(map))` reproduces the map exactly. Each map's
//! entries are read under that map's shared lock.

use tracing::debug;

use super::error::EncodeError;
use super::options::EncodeOptions;
use crate::{Number, OrderedMap, Value};

pub struct JsonEncoder {
    buf: Vec<u8>,
    options: EncodeOptions,
    depth: usize,
    /// Addresses of the maps currently being written, outermost first.
    ancestors: Vec<usize>,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            options: EncodeOptions::default(),
            depth: 0,
            ancestors: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn encode(&mut self, map: &OrderedMap) -> Result<Vec<u8>, EncodeError> {
        self.reset();
        let result = self.write_obj(map);
        self.finish(result)
    }

    /// Encodes any value, not just an object.
    pub fn encode_value(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.reset();
        let result = self.write_any(value);
        self.finish(result)
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.depth = 0;
        self.ancestors.clear();
    }

    fn finish(&mut self, result: Result<(), EncodeError>) -> Result<Vec<u8>, EncodeError> {
        match result {
            Ok(()) => Ok(std::mem::take(&mut self.buf)),
            Err(err) => {
                debug!(error = %err, "cannot encode value as JSON");
                self.reset();
                Err(err)
            }
        }
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_str(s),
            Value::Array(arr) => return self.write_arr(arr),
            Value::Object(map) => return self.write_obj(map),
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.buf.extend_from_slice(b"null");
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.buf
            .extend_from_slice(if b { b"true".as_slice() } else { b"false" });
    }

    pub fn write_number(&mut self, n: &Number) {
        self.buf.extend_from_slice(n.as_str().as_bytes());
    }

    /// Writes a JSON string literal, escaping as RFC 8259 requires.
    pub fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let plain = bytes
            .iter()
            .all(|&b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
        if plain {
            self.buf.reserve(bytes.len() + 2);
            self.buf.push(b'"');
            self.buf.extend_from_slice(bytes);
            self.buf.push(b'"');
            return;
        }
        let json_str = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
        self.buf.extend_from_slice(json_str.as_bytes());
    }

    fn enter(&mut self) -> Result<(), EncodeError> {
        if self.depth >= self.options.max_depth {
            return Err(EncodeError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn write_arr(&mut self, arr: &[Value]) -> Result<(), EncodeError> {
        self.enter()?;
        self.buf.push(b'[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.buf.push(b',');
            }
            self.write_any(item)?;
        }
        self.buf.push(b']');
        self.depth -= 1;
        Ok(())
    }

    pub fn write_obj(&mut self, map: &OrderedMap) -> Result<(), EncodeError> {
        let addr = map as *const OrderedMap as usize;
        // Checked before taking the map's lock, so a cycle never re-enters it.
        if self.ancestors.contains(&addr) {
            return Err(EncodeError::Cycle);
        }
        self.enter()?;
        self.ancestors.push(addr);
        self.buf.push(b'{');
        map.try_for_each_entry(|i, key, value| {
            if i > 0 {
                self.buf.push(b',');
            }
            self.write_str(key);
            self.buf.push(b':');
            self.write_any(value)
        })?;
        self.buf.push(b'}');
        self.ancestors.pop();
        self.depth -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn encode(map: &OrderedMap) -> String {
        String::from_utf8(JsonEncoder::new().encode(map).unwrap()).unwrap()
    }

    #[test]
    fn empty_object() {
        assert_eq!(encode(&OrderedMap::new()), "{}");
    }

    #[test]
    fn insertion_order_and_update() {
        let map = OrderedMap::new();
        map.set("b", 1);
        map.set("a", 2);
        map.set("b", 3);
        assert_eq!(encode(&map), r#"{"b":3,"a":2}"#);
    }

    #[test]
    fn scalars() {
        let map = OrderedMap::from_pairs([
            ("n", Value::Null),
            ("t", Value::from(true)),
            ("f", Value::from(false)),
            ("i", Value::from(-7)),
            ("x", Value::from(0.5)),
            ("s", Value::from("hi")),
        ]);
        assert_eq!(
            encode(&map),
            r#"{"n":null,"t":true,"f":false,"i":-7,"x":0.5,"s":"hi"}"#
        );
    }

    #[test]
    fn string_escaping() {
        let map = OrderedMap::from_pairs([("q\"k", "a\\b\n\u{1}é")]);
        assert_eq!(encode(&map), r#"{"q\"k":"a\\b\n\u0001é"}"#);
    }

    #[test]
    fn nested() {
        let inner = OrderedMap::from_pairs([(
            "y",
            Value::from(vec![Value::from(1), Value::from("z")]),
        )]);
        let map = OrderedMap::from_pairs([("x", Value::from(inner)), ("w", Value::from(true))]);
        assert_eq!(encode(&map), r#"{"x":{"y":[1,"z"]},"w":true}"#);
    }

    #[test]
    fn number_lexeme_written_verbatim() {
        let map = OrderedMap::from_pairs([
            ("a", "1.0".parse::<Number>().unwrap()),
            ("b", "1e400".parse::<Number>().unwrap()),
            ("c", "-0".parse::<Number>().unwrap()),
        ]);
        assert_eq!(encode(&map), r#"{"a":1.0,"b":1e400,"c":-0}"#);
    }

    #[test]
    fn negative_zero_float_keeps_sign() {
        let map = OrderedMap::from_pairs([("z", -0.0)]);
        assert_eq!(encode(&map), r#"{"z":-0.0}"#);
    }

    #[test]
    fn direct_cycle() {
        let map = Arc::new(OrderedMap::new());
        map.set("me", Arc::clone(&map));
        assert_eq!(JsonEncoder::new().encode(&map), Err(EncodeError::Cycle));
        map.delete("me");
    }

    #[test]
    fn indirect_cycle() {
        let a = Arc::new(OrderedMap::new());
        let b = Arc::new(OrderedMap::new());
        a.set("b", Arc::clone(&b));
        b.set("list", vec![Value::from(Arc::clone(&a))]);
        assert_eq!(JsonEncoder::new().encode(&a), Err(EncodeError::Cycle));
        b.delete("list");
    }

    #[test]
    fn shared_map_is_not_a_cycle() {
        let shared = Arc::new(OrderedMap::from_pairs([("k", 1)]));
        let map = OrderedMap::from_pairs([
            ("a", Value::from(Arc::clone(&shared))),
            ("b", Value::from(Arc::clone(&shared))),
        ]);
        assert_eq!(encode(&map), r#"{"a":{"k":1},"b":{"k":1}}"#);
    }

    #[test]
    fn depth_limit() {
        let map = OrderedMap::from_pairs([("a", vec![vec![1]])]);
        let mut encoder =
            JsonEncoder::new().with_options(EncodeOptions::default().with_max_depth(3));
        assert_eq!(encoder.encode(&map).unwrap(), br#"{"a":[[1]]}"#.to_vec());

        let mut encoder =
            JsonEncoder::new().with_options(EncodeOptions::default().with_max_depth(2));
        assert_eq!(
            encoder.encode(&map),
            Err(EncodeError::DepthLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn encoder_is_reusable_after_error() {
        let cyclic = Arc::new(OrderedMap::new());
        cyclic.set("me", Arc::clone(&cyclic));
        let mut encoder = JsonEncoder::new();
        assert!(encoder.encode(&cyclic).is_err());
        assert_eq!(
            encoder.encode(&OrderedMap::from_pairs([("ok", true)])).unwrap(),
            br#"{"ok":true}"#.to_vec()
        );
        cyclic.delete("me");
    }

    #[test]
    fn encode_value() {
        let mut encoder = JsonEncoder::new();
        assert_eq!(
            encoder.encode_value(&Value::from("x")).unwrap(),
            b"\"x\"".to_vec()
        );
        assert_eq!(
            encoder.encode_value(&Value::from(vec![1, 2])).unwrap(),
            b"[1,2]".to_vec()
        );
    }
}
