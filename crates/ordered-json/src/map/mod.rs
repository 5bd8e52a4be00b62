//! [`OrderedMap`]: a string-keyed map that remembers first-insertion order.
//!
//! Lookups go through a hash index (key → arena handle); order is kept by the
//! doubly linked slot [`arena`]. All operations take `&self` and serialize on
//! one `RwLock` owned by the instance: shared for reads, exclusive for
//! `set`/`delete`.

mod arena;
mod iter;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::value::{self, Value};
use arena::Arena;

pub use iter::Iter;

/// One `(key, value)` snapshot, used to seed a map and yielded by iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyValuePair {
    pub key: String,
    pub value: Value,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for KeyValuePair {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[derive(Debug, Default)]
struct Inner {
    index: HashMap<String, u32>,
    order: Arena,
}

impl Inner {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: Arena::with_capacity(capacity),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        let idx = *self.index.get(key)?;
        self.order.get(idx).map(|slot| &slot.value)
    }

    fn set(&mut self, key: String, value: Value) -> Option<Value> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(slot) = self.order.get_mut(idx) {
                return Some(std::mem::replace(&mut slot.value, value));
            }
        }
        let idx = self.order.push_back(key.clone(), value);
        self.index.insert(key, idx);
        None
    }

    fn delete(&mut self, key: &str) -> Option<Value> {
        let idx = self.index.remove(key)?;
        self.order.remove(idx).map(|(_, value)| value)
    }
}

/// Insertion-ordered, thread-safe map from `String` to [`Value`].
///
/// Re-setting a key replaces its value in place; it never moves. Deleting a
/// key unlinks it from both the hash index and the order index in the same
/// critical section.
///
/// ```
/// use ordered_json::{OrderedMap, Value};
///
/// let map = OrderedMap::new();
/// map.set("b", 1);
/// map.set("a", 2);
/// map.set("b", 3);
///
/// let keys: Vec<String> = map.iter().map(|pair| pair.key).collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(map.get("b"), Value::from(3));
/// ```
#[derive(Default)]
pub struct OrderedMap {
    inner: RwLock<Inner>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::with_capacity(capacity)),
        }
    }

    /// Builds a map by applying [`set`](Self::set) to each pair in order, so a
    /// repeated key keeps its first position and its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<KeyValuePair>,
    {
        let pairs = pairs.into_iter();
        let map = Self::with_capacity(pairs.size_hint().0);
        {
            let mut inner = map.write();
            for pair in pairs {
                let KeyValuePair { key, value } = pair.into();
                inner.set(key, value);
            }
        }
        map
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or updates `key`. Returns the value it replaced, if any.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().set(key.into(), value.into())
    }

    pub fn has(&self, key: &str) -> bool {
        self.read().index.contains_key(key)
    }

    /// Value stored under `key`, or [`Value::Null`] when the key is absent.
    ///
    /// A stored `null` and a missing key look the same here; use
    /// [`get_with_existence`](Self::get_with_existence) to tell them apart.
    pub fn get(&self, key: &str) -> Value {
        self.read().get(key).cloned().unwrap_or_default()
    }

    /// Value stored under `key`; `None` only when the key is absent.
    pub fn get_with_existence(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&self, key: &str) -> Option<Value> {
        self.write().delete(key)
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in insertion order, read under one lock.
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .order
            .iter()
            .map(|slot| slot.key.clone())
            .collect()
    }

    /// All pairs in insertion order, read under one lock.
    pub fn entries(&self) -> Vec<KeyValuePair> {
        self.read()
            .order
            .iter()
            .map(|slot| KeyValuePair {
                key: slot.key.clone(),
                value: slot.value.clone(),
            })
            .collect()
    }

    /// Forward cursor over the keys present right now.
    ///
    /// Every call starts a fresh, independent traversal. The key list is
    /// snapshotted when the cursor is created; each step takes the read lock
    /// only long enough to fetch one value, and keys deleted in the meantime
    /// are skipped. Keys added after the snapshot are not visited.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self, self.keys())
    }

    /// Backward cursor; exactly the reverse of [`iter`](Self::iter).
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_>> {
        self.iter().rev()
    }

    /// Structural, order-sensitive equality.
    ///
    /// Equal maps have the same length and yield identical keys with deeply
    /// equal values at every position.
    pub fn equal(&self, other: &OrderedMap) -> bool {
        value::maps_equal(self, other)
    }

    /// Visits every entry in order while holding the read lock.
    pub(crate) fn try_for_each_entry<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, &str, &Value) -> Result<(), E>,
    {
        let inner = self.read();
        for (i, slot) in inner.order.iter().enumerate() {
            f(i, &slot.key, &slot.value)?;
        }
        Ok(())
    }
}

impl Clone for OrderedMap {
    /// Copies the entries into a map with its own lock. Nested maps are
    /// shared, not copied.
    fn clone(&self) -> Self {
        let inner = self.read();
        let mut copy = Inner::with_capacity(inner.order.len());
        for slot in inner.order.iter() {
            copy.set(slot.key.clone(), slot.value.clone());
        }
        Self {
            inner: RwLock::new(copy),
        }
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

thread_local! {
    /// Addresses of the maps being formatted on this thread, outermost first.
    static FORMATTING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Pops its map off [`FORMATTING`] when formatting of that map ends.
struct FormattingGuard;

impl FormattingGuard {
    /// `None` when `addr` is already being formatted further up the stack.
    fn enter(addr: usize) -> Option<Self> {
        FORMATTING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&addr) {
                return None;
            }
            stack.push(addr);
            Some(FormattingGuard)
        })
    }
}

impl Drop for FormattingGuard {
    fn drop(&mut self) {
        FORMATTING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

impl fmt::Debug for OrderedMap {
    /// A map that contains itself prints as `{..}` at the point of recursion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_guard) = FormattingGuard::enter(self as *const OrderedMap as usize) else {
            return f.write_str("{..}");
        };
        let inner = self.read();
        f.debug_map()
            .entries(inner.order.iter().map(|slot| (&slot.key, &slot.value)))
            .finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for OrderedMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in iter {
            inner.set(key.into(), value.into());
        }
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = KeyValuePair;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
