use std::iter::FusedIterator;
use std::vec;

use super::{KeyValuePair, OrderedMap};

/// Cursor over an [`OrderedMap`], created by [`OrderedMap::iter`].
///
/// Walks a snapshot of the keys taken at creation time from either end.
/// Values are looked up one step at a time, so a concurrent `set` is visible
/// to later steps and a concurrently deleted key is skipped.
pub struct Iter<'a> {
    map: &'a OrderedMap,
    keys: vec::IntoIter<String>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(map: &'a OrderedMap, keys: Vec<String>) -> Self {
        Self {
            map,
            keys: keys.into_iter(),
        }
    }

    fn materialize(&self, key: String) -> Option<KeyValuePair> {
        let value = self.map.get_with_existence(&key)?;
        Some(KeyValuePair { key, value })
    }
}

impl Iterator for Iter<'_> {
    type Item = KeyValuePair;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.keys.next()?;
            if let Some(pair) = self.materialize(key) {
                return Some(pair);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.keys.len()))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.keys.next_back()?;
            if let Some(pair) = self.materialize(key) {
                return Some(pair);
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}
