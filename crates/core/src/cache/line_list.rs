//! Per-set LRU recency list.
//!
//! Each set owns a fixed-capacity slot array threaded by an intrusive doubly
//! linked list of indices. The head is the most recently used line and the
//! tail the least recently used one:
//!
//! ```text
//!   slots:  [ A ][ B ][ C ][ D ]        capacity = associativity
//!   order:  head → C ⇄ A ⇄ D ⇄ B ← tail
//!   free:   slots released by `evict_tail`, reused by `insert_front`
//! ```
//!
//! Lines are only ever owned by the slot array of their set, so unlinking and
//! relinking is pure index manipulation.
//!
//! # Performance
//!
//! - `move_to_front()`, `insert_front()`, `evict_tail()`: O(1)
//! - `find()`: O(W) where W is the associativity (typically ≤ 16)

use serde::Serialize;

use crate::common::error::CacheError;

/// Sentinel index marking the end of a chain.
const NIL: usize = usize::MAX;

/// Handle to a resident line within one [`LineList`].
///
/// A handle stays valid until the line it names is evicted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// Cache line metadata. No data payload is modelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Tag of the block held by this line.
    pub tag: u64,
    /// Block holds data not yet reflected in backing storage.
    pub dirty: bool,
}

impl CacheLine {
    /// Creates a line holding `tag` with the given dirty state.
    pub const fn new(tag: u64, dirty: bool) -> Self {
        Self { tag, dirty }
    }
}

/// Recency-ordered set of resident lines.
#[derive(Clone, Debug)]
pub struct LineList {
    lines: Vec<CacheLine>,
    prev: Vec<usize>,
    next: Vec<usize>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
    capacity: usize,
}

impl LineList {
    /// Creates an empty list able to hold `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            prev: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
            capacity,
        }
    }

    /// Number of resident lines.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no line is resident.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of resident lines.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once every slot is occupied.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Most recently used line, if any.
    #[inline]
    pub const fn head(&self) -> Option<SlotId> {
        if self.head == NIL {
            None
        } else {
            Some(SlotId(self.head))
        }
    }

    /// Least recently used line, if any. This is the eviction candidate.
    #[inline]
    pub const fn tail(&self) -> Option<SlotId> {
        if self.tail == NIL {
            None
        } else {
            Some(SlotId(self.tail))
        }
    }

    /// Finds the resident line holding `tag`.
    pub fn find(&self, tag: u64) -> Option<SlotId> {
        let mut cursor = self.head;
        while cursor != NIL {
            if self.lines[cursor].tag == tag {
                return Some(SlotId(cursor));
            }
            cursor = self.next[cursor];
        }
        None
    }

    /// Returns the line behind `slot`.
    #[inline]
    pub fn line(&self, slot: SlotId) -> &CacheLine {
        &self.lines[slot.0]
    }

    /// Returns the line behind `slot` mutably.
    #[inline]
    pub fn line_mut(&mut self, slot: SlotId) -> &mut CacheLine {
        &mut self.lines[slot.0]
    }

    /// Moves `slot` to the head of the list. No-op if it is already there.
    pub fn move_to_front(&mut self, slot: SlotId) {
        if slot.0 == self.head {
            return;
        }
        self.unlink(slot.0);
        self.link_front(slot.0);
    }

    /// Adds a new line at the head of the list.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if the list is already full.
    pub fn insert_front(&mut self, line: CacheLine) -> Result<SlotId, CacheError> {
        if self.is_full() {
            return Err(CacheError::InvariantViolation("insert into a full set"));
        }
        let idx = if let Some(idx) = self.free.pop() {
            self.lines[idx] = line;
            idx
        } else {
            self.lines.push(line);
            self.prev.push(NIL);
            self.next.push(NIL);
            self.lines.len() - 1
        };
        self.link_front(idx);
        self.len += 1;
        Ok(SlotId(idx))
    }

    /// Removes and returns the least recently used line.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if the list is empty.
    pub fn evict_tail(&mut self) -> Result<CacheLine, CacheError> {
        if self.tail == NIL {
            return Err(CacheError::InvariantViolation("eviction from an empty set"));
        }
        let idx = self.tail;
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        Ok(self.lines[idx])
    }

    /// Clears every dirty bit and returns how many lines were dirty.
    pub fn clean_all(&mut self) -> usize {
        let mut cleaned = 0;
        let mut cursor = self.head;
        while cursor != NIL {
            let line = &mut self.lines[cursor];
            if line.dirty {
                line.dirty = false;
                cleaned += 1;
            }
            cursor = self.next[cursor];
        }
        cleaned
    }

    /// Iterates over resident lines from most to least recently used.
    pub const fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Tags of resident lines from most to least recently used.
    pub fn tags(&self) -> Vec<u64> {
        self.iter().map(|line| line.tag).collect()
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.prev[idx], self.next[idx]);
        if prev == NIL {
            self.head = next;
        } else {
            self.next[prev] = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.prev[next] = prev;
        }
        self.prev[idx] = NIL;
        self.next[idx] = NIL;
    }

    fn link_front(&mut self, idx: usize) {
        self.prev[idx] = NIL;
        self.next[idx] = self.head;
        if self.head == NIL {
            self.tail = idx;
        } else {
            self.prev[self.head] = idx;
        }
        self.head = idx;
    }
}

/// Iterator over the lines of a [`LineList`] in recency order.
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a LineList,
    cursor: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let line = &self.list.lines[self.cursor];
        self.cursor = self.list.next[self.cursor];
        Some(line)
    }
}

impl<'a> IntoIterator for &'a LineList {
    type Item = &'a CacheLine;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
