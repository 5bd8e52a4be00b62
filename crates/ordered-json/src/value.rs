//! [`Value`]: anything an [`OrderedMap`] can hold.
//!
//! Equality is an explicit structural recursion over the variants. Nested
//! maps are compared position by position, so member order is part of a
//! value's identity.

use std::ptr;
use std::sync::Arc;

use crate::{Number, OrderedMap};

/// A JSON value whose objects are [`OrderedMap`]s.
///
/// Objects are shared handles: cloning a `Value::Object` clones the `Arc`,
/// and a nested map can be updated in place through any handle to it.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Arc<OrderedMap>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<OrderedMap>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// JSON type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

/// Structural equality of two values.
///
/// Terminates on cyclic structures: a pair of maps already being compared
/// further up the recursion is assumed equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    values_equal(a, b, &mut Vec::new())
}

pub(crate) fn maps_equal(a: &OrderedMap, b: &OrderedMap) -> bool {
    objects_equal(a, b, &mut Vec::new())
}

type Visiting = Vec<(*const OrderedMap, *const OrderedMap)>;

fn values_equal(a: &Value, b: &Value, visiting: &mut Visiting) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a
                .iter()
                .zip(arr_b)
                .all(|(a, b)| values_equal(a, b, visiting))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => objects_equal(obj_a, obj_b, visiting),
        _ => false,
    }
}

fn objects_equal(a: &OrderedMap, b: &OrderedMap, visiting: &mut Visiting) -> bool {
    if ptr::eq(a, b) {
        return true;
    }
    let pair = (a as *const OrderedMap, b as *const OrderedMap);
    if visiting.contains(&pair) {
        return true;
    }
    // Snapshots, so no lock is held while recursing into nested maps.
    let left = a.entries();
    let right = b.entries();
    if left.len() != right.len() {
        return false;
    }
    visiting.push(pair);
    let equal = left
        .iter()
        .zip(&right)
        .all(|(l, r)| l.key == r.key && values_equal(&l.value, &r.value, visiting));
    visiting.pop();
    equal
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for Value {
    /// NaN and infinities become `null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::from(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<OrderedMap> for Value {
    fn from(map: OrderedMap) -> Self {
        Value::Object(Arc::new(map))
    }
}

impl From<Arc<OrderedMap>> for Value {
    fn from(map: Arc<OrderedMap>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    /// Lossless: numbers keep `serde_json`'s own textual form and objects keep
    /// their member order (`preserve_order`).
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from_lexeme(n.to_string())),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::from(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<OrderedMap>(),
            ),
        }
    }
}
