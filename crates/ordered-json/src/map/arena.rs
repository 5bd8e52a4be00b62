//! Insertion-order index.
//!
//! Entries live in a `Vec`-backed slot arena. Every "pointer" is an
//! `Option<u32>` handle into that arena, the same layout the sonic-forest
//! trees use, so a slot never moves once allocated: appending and unlinking
//! are O(1) and leave every other handle valid. Vacated slots are pushed onto
//! a free list and reused by the next append.

use crate::value::Value;

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub key: String,
    pub value: Value,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    slots: Vec<Option<Slot>>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn get(&self, idx: u32) -> Option<&Slot> {
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: u32) -> Option<&mut Slot> {
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    /// First slot in insertion order.
    #[inline]
    pub fn first(&self) -> Option<u32> {
        self.head
    }

    /// Last slot in insertion order.
    #[inline]
    pub fn last(&self) -> Option<u32> {
        self.tail
    }

    #[inline]
    pub fn next(&self, idx: u32) -> Option<u32> {
        self.get(idx).and_then(|slot| slot.next)
    }

    #[inline]
    pub fn prev(&self, idx: u32) -> Option<u32> {
        self.get(idx).and_then(|slot| slot.prev)
    }

    /// Links a new slot after the current tail and returns its handle.
    pub fn push_back(&mut self, key: String, value: Value) -> u32 {
        let slot = Slot {
            key,
            value,
            prev: self.tail,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(slot);
                idx
            }
            None => {
                debug_assert!(self.slots.len() < u32::MAX as usize);
                self.slots.push(Some(slot));
                (self.slots.len() - 1) as u32
            }
        };
        match self.tail {
            Some(tail) => {
                if let Some(prev) = self.get_mut(tail) {
                    prev.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        idx
    }

    /// Unlinks `idx`, vacates its slot and returns the stored pair.
    pub fn remove(&mut self, idx: u32) -> Option<(String, Value)> {
        let slot = self.slots.get_mut(idx as usize)?.take()?;
        match slot.prev {
            Some(prev) => {
                if let Some(p) = self.get_mut(prev) {
                    p.next = slot.next;
                }
            }
            None => self.head = slot.next,
        }
        match slot.next {
            Some(next) => {
                if let Some(n) = self.get_mut(next) {
                    n.prev = slot.prev;
                }
            }
            None => self.tail = slot.prev,
        }
        self.free.push(idx);
        self.len -= 1;
        Some((slot.key, slot.value))
    }

    /// Live slots from head to tail; double-ended.
    pub fn iter(&self) -> Slots<'_> {
        Slots {
            arena: self,
            front: self.first(),
            back: self.last(),
            remaining: self.len,
        }
    }
}

pub(crate) struct Slots<'a> {
    arena: &'a Arena,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a> Iterator for Slots<'a> {
    type Item = &'a Slot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.front = self.arena.next(idx);
        self.remaining -= 1;
        self.arena.get(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Slots<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.back = self.arena.prev(idx);
        self.remaining -= 1;
        self.arena.get(idx)
    }
}

impl ExactSizeIterator for Slots<'_> {}
