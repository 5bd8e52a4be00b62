//! Insertion-ordered, thread-safe string map with an order-preserving JSON
//! codec.
//!
//! [`OrderedMap`] behaves like a string-keyed dictionary (O(1) `set`, `get`,
//! `has`, `delete`) but also remembers the order in which keys were first
//! inserted. The [`json`] module decodes JSON objects into `OrderedMap` trees
//! and encodes them back with member order, and number lexemes, unchanged.
//!
//! # Example
//!
//! ```
//! use ordered_json::{json, OrderedMap, Value};
//!
//! let map = OrderedMap::new();
//! map.set("b", 1);
//! map.set("a", 2);
//! map.set("b", 3);
//! assert_eq!(json::to_string(&map).unwrap(), r#"{"b":3,"a":2}"#);
//!
//! let decoded = json::from_str(r#"{"b":3,"a":2}"#).unwrap();
//! assert_eq!(decoded, map);
//! assert_eq!(decoded.get("a"), Value::from(2));
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`map`] | [`OrderedMap`], [`KeyValuePair`], iteration |
//! | [`value`] | [`Value`] and structural equality |
//! | [`number`] | [`Number`], lossless numeric literals |
//! | [`json`] | decoder, encoder, options and errors |
//! | [`sort`] | [`SortBy`], a multi-field sort specification |

pub mod json;
pub mod map;
pub mod number;
pub mod sort;
pub mod value;

pub use map::{Iter, KeyValuePair, OrderedMap};
pub use number::Number;
pub use sort::{Direction, SortBy};
pub use value::{deep_equal, Value};
