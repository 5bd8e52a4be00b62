//! Multi-field sort specifications backed by an [`OrderedMap`].
//!
//! A field name maps to `true` for ascending and `false` for descending;
//! insertion order is sort priority. Tagged field names use a leading `-` for
//! descending, so `["-created", "name"]` sorts by `created` descending, then
//! `name` ascending.

use std::fmt;

use crate::{OrderedMap, Value};

const DESC: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortBy {
    fields: OrderedMap,
}

impl SortBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses tagged field names. A repeated field keeps its first position
    /// and takes the direction of its last occurrence.
    pub fn parse<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sort = Self::new();
        for spec in specs {
            let spec = spec.as_ref();
            match spec.strip_prefix(DESC) {
                Some(field) => sort.push(field, Direction::Descending),
                None => sort.push(spec, Direction::Ascending),
            }
        }
        sort
    }

    pub fn push(&self, field: &str, direction: Direction) {
        self.fields.set(field, direction.is_ascending());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `(field, direction)` in priority order. Anything other than
    /// `false` stored under a field reads as ascending.
    pub fn directives(&self) -> Vec<(String, Direction)> {
        self.fields
            .iter()
            .map(|pair| {
                let direction = match pair.value {
                    Value::Bool(false) => Direction::Descending,
                    _ => Direction::Ascending,
                };
                (pair.key, direction)
            })
            .collect()
    }

    pub fn as_map(&self) -> &OrderedMap {
        &self.fields
    }
}

impl From<OrderedMap> for SortBy {
    fn from(fields: OrderedMap) -> Self {
        Self { fields }
    }
}

impl fmt::Display for SortBy {
    /// Canonical tagged form, e.g. `-created,name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, direction)) in self.directives().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if direction == Direction::Descending {
                write!(f, "{DESC}")?;
            }
            f.write_str(&field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tagged_fields() {
        let sort = SortBy::parse(["-created", "name"]);
        assert_eq!(
            sort.directives(),
            vec![
                ("created".to_string(), Direction::Descending),
                ("name".to_string(), Direction::Ascending),
            ]
        );
        assert_eq!(sort.to_string(), "-created,name");
    }

    #[test]
    fn repeated_field_keeps_position() {
        let sort = SortBy::parse(["a", "b", "-a"]);
        assert_eq!(sort.len(), 2);
        assert_eq!(sort.to_string(), "-a,b");
    }

    #[test]
    fn empty() {
        let sort = SortBy::new();
        assert!(sort.is_empty());
        assert_eq!(sort.to_string(), "");
    }

    #[test]
    fn backing_map_is_json_ready() {
        let sort = SortBy::parse(["-score", "id"]);
        assert_eq!(
            crate::json::to_string(sort.as_map()).unwrap(),
            r#"{"score":false,"id":true}"#
        );
    }

    #[test]
    fn from_decoded_map() {
        let map = crate::json::from_str(r#"{"b":false,"a":true}"#).unwrap();
        assert_eq!(SortBy::from(map).to_string(), "-b,a");
    }
}
