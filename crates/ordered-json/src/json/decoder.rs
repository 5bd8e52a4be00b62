//! `JsonDecoder`: byte-level recursive-descent parser producing
//! [`OrderedMap`] trees.
//!
//! The top level must be a single object. Objects decode to `OrderedMap`
//! (member order preserved), arrays to `Vec<Value>`, and numbers keep their
//! source lexeme.

use std::sync::Arc;

use tracing::{debug, trace};

use super::error::{Container, ParseError};
use super::options::{DecodeOptions, DuplicateKeys};
use crate::number::{scan_number, Number};
use crate::{OrderedMap, Value};

pub struct JsonDecoder<'a> {
    data: &'a [u8],
    x: usize,
    options: DecodeOptions,
}

impl<'a> JsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decodes the whole input. Nothing is returned unless every byte was
    /// accepted.
    pub fn decode(mut self) -> Result<OrderedMap, ParseError> {
        let result = self.read_document();
        if let Err(err) = &result {
            debug!(offset = err.offset(), error = %err, "rejecting JSON document");
        }
        result
    }

    fn read_document(&mut self) -> Result<OrderedMap, ParseError> {
        self.skip_whitespace();
        if self.peek() != Some(b'{') {
            return Err(ParseError::ExpectedObject { offset: self.x });
        }
        let map = self.read_obj(1)?;
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(ParseError::TrailingContent { offset: self.x });
        }
        Ok(map)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    fn enter(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
                offset: self.x,
            });
        }
        Ok(())
    }

    /// `depth` is the nesting level of the container holding this value.
    fn read_any(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.skip_whitespace();
        let x = self.x;
        let Some(ch) = self.peek() else {
            return Err(ParseError::UnexpectedEnd { offset: x });
        };
        match ch {
            b'{' => Ok(Value::Object(Arc::new(self.read_obj(depth + 1)?))),
            b'[' => Ok(Value::Array(self.read_arr(depth + 1)?)),
            b'"' => Ok(Value::String(self.read_str()?)),
            b't' => self.read_literal(b"true", Value::Bool(true)),
            b'f' => self.read_literal(b"false", Value::Bool(false)),
            b'n' => self.read_literal(b"null", Value::Null),
            b'-' | b'0'..=b'9' => Ok(Value::Number(self.read_num()?)),
            byte => Err(ParseError::UnexpectedByte { byte, offset: x }),
        }
    }

    fn read_literal(&mut self, literal: &[u8], value: Value) -> Result<Value, ParseError> {
        if !self.data[self.x..].starts_with(literal) {
            return Err(ParseError::InvalidLiteral { offset: self.x });
        }
        self.x += literal.len();
        Ok(value)
    }

    fn read_num(&mut self) -> Result<Number, ParseError> {
        let start = self.x;
        let end = scan_number(self.data, start).ok_or(ParseError::InvalidNumber { offset: start })?;
        let lexeme = std::str::from_utf8(&self.data[start..end])
            .map_err(|_| ParseError::InvalidNumber { offset: start })?;
        self.x = end;
        Ok(Number::from_lexeme(lexeme.to_string()))
    }

    fn read_str(&mut self) -> Result<String, ParseError> {
        let start = self.x;
        let body = start + 1;
        let end = find_ending_quote(self.data, body).ok_or(ParseError::UnexpectedEnd {
            offset: self.data.len(),
        })?;
        let s = decode_json_string(&self.data[body..end])
            .ok_or(ParseError::InvalidString { offset: start })?;
        self.x = end + 1;
        Ok(s)
    }

    fn read_arr(&mut self, depth: usize) -> Result<Vec<Value>, ParseError> {
        self.enter(depth)?;
        let start = self.x;
        self.x += 1;
        let mut arr = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(arr);
        }
        loop {
            arr.push(self.read_any(depth)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    return Ok(arr);
                }
                _ => {
                    return Err(ParseError::Unclosed {
                        container: Container::Array,
                        start,
                        offset: self.x,
                    })
                }
            }
        }
    }

    fn read_obj(&mut self, depth: usize) -> Result<OrderedMap, ParseError> {
        self.enter(depth)?;
        let start = self.x;
        self.x += 1;
        let map = OrderedMap::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(map);
        }
        loop {
            self.skip_whitespace();
            let key_offset = self.x;
            match self.peek() {
                Some(b'"') => {}
                Some(_) => return Err(ParseError::NonStringKey { offset: key_offset }),
                None => return Err(ParseError::UnexpectedEnd { offset: key_offset }),
            }
            let key = self.read_str()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.x += 1,
                Some(_) => return Err(ParseError::ExpectedColon { offset: self.x }),
                None => return Err(ParseError::UnexpectedEnd { offset: self.x }),
            }
            let value = self.read_any(depth)?;
            self.insert(&map, key, value, key_offset)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    return Ok(map);
                }
                _ => {
                    return Err(ParseError::Unclosed {
                        container: Container::Object,
                        start,
                        offset: self.x,
                    })
                }
            }
        }
    }

    fn insert(
        &self,
        map: &OrderedMap,
        key: String,
        value: Value,
        offset: usize,
    ) -> Result<(), ParseError> {
        match self.options.duplicate_keys {
            DuplicateKeys::LastWins => {
                if map.set(key, value).is_some() {
                    trace!(offset, "duplicate key, keeping last value");
                }
            }
            DuplicateKeys::FirstWins => {
                if map.has(&key) {
                    trace!(offset, key = %key, "duplicate key, keeping first value");
                } else {
                    map.set(key, value);
                }
            }
            DuplicateKeys::Reject => {
                if map.has(&key) {
                    return Err(ParseError::DuplicateKey { key, offset });
                }
                map.set(key, value);
            }
        }
        Ok(())
    }
}

/// Offset of the quote closing a string whose body starts at `x`.
fn find_ending_quote(data: &[u8], mut x: usize) -> Option<usize> {
    while x < data.len() {
        match data[x] {
            b'"' => return Some(x),
            b'\\' => x += 2,
            _ => x += 1,
        }
    }
    None
}

/// Decodes a string body (between the quotes). Escapes are resolved by
/// serde_json.
fn decode_json_string(bytes: &[u8]) -> Option<String> {
    if !bytes.contains(&b'\\') {
        if bytes.iter().any(|&b| b < 0x20) {
            return None;
        }
        return std::str::from_utf8(bytes).ok().map(str::to_string);
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).ok()
}
