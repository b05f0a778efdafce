use super::{StoreError, StoreResult, copy_blob};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Width of keys accepted by a [`KeyOrder::Numeric`] store: native-endian `u32`.
pub const NUMERIC_KEY_WIDTH: usize = 4;

/// Key comparator, chosen when the store is built and fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyOrder {
    /// Plain byte-wise ordering. Embedded zero bytes compare like any other byte.
    #[default]
    Lexicographic,
    /// Keys are native-endian `u32` values ordered numerically.
    Numeric,
}

#[derive(Debug, Clone)]
struct Entry {
    key: Box<[u8]>,
    value: Box<[u8]>,
}

/// Ordered associative container keyed by arbitrary byte sequences.
///
/// Keys and values are owned blobs that carry their own length. At most one
/// cursor handed out by [`OrderedStore::iterate`] is live at a time: starting
/// a new iteration turns every earlier cursor stale, and a stale cursor
/// yields nothing.
#[derive(Debug, Clone, Default)]
pub struct OrderedStore {
    order: KeyOrder,
    // keyed by the comparator's sort form; `Entry::key` keeps the caller's bytes
    entries: BTreeMap<Box<[u8]>, Entry>,
    generation: u64,
}

/// Position of a single ascending walk over an [`OrderedStore`].
#[derive(Debug, Clone)]
pub struct StoreCursor {
    generation: u64,
    last: Option<Box<[u8]>>,
    finished: bool,
}

impl StoreCursor {
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl OrderedStore {
    pub fn new(order: KeyOrder) -> Self {
        Self {
            order,
            entries: BTreeMap::new(),
            generation: 0,
        }
    }

    pub fn lexicographic() -> Self {
        Self::new(KeyOrder::Lexicographic)
    }

    pub fn numeric() -> Self {
        Self::new(KeyOrder::Numeric)
    }

    pub fn order(&self) -> KeyOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sort_key<'k>(&self, key: &'k [u8]) -> Option<Cow<'k, [u8]>> {
        match self.order {
            KeyOrder::Lexicographic => Some(Cow::Borrowed(key)),
            KeyOrder::Numeric => {
                let raw: [u8; NUMERIC_KEY_WIDTH] = key.try_into().ok()?;
                Some(Cow::Owned(u32::from_ne_bytes(raw).to_be_bytes().to_vec()))
            }
        }
    }

    fn owned_sort_key(&self, key: &[u8]) -> StoreResult<Box<[u8]>> {
        match self.sort_key(key) {
            Some(Cow::Borrowed(raw)) => copy_blob(raw),
            Some(Cow::Owned(sorted)) => Ok(sorted.into_boxed_slice()),
            None => Err(StoreError::KeyWidth {
                expected: NUMERIC_KEY_WIDTH,
                found: key.len(),
            }),
        }
    }

    /// Inserts `key → value`, dropping any value previously stored under `key`.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let value = copy_blob(value)?;

        if let Some(sorted) = self.sort_key(key)
            && let Some(existing) = self.entries.get_mut(sorted.as_ref())
        {
            existing.value = value;
            return Ok(());
        }

        let sorted = self.owned_sort_key(key)?;
        let key = copy_blob(key)?;
        self.entries.insert(sorted, Entry { key, value });
        Ok(())
    }

    /// Inserts `key → value` only when `key` is absent. Returns whether the
    /// value was stored; an existing value is left untouched.
    pub fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> StoreResult<bool> {
        if self.contains_key(key) {
            return Ok(false);
        }
        let sorted = self.owned_sort_key(key)?;
        let entry = Entry {
            key: copy_blob(key)?,
            value: copy_blob(value)?,
        };
        self.entries.insert(sorted, entry);
        Ok(true)
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let sorted = self.sort_key(key)?;
        self.entries
            .get(sorted.as_ref())
            .map(|entry| entry.value.as_ref())
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, handing its value to the caller.
    pub fn remove(&mut self, key: &[u8]) -> Option<Box<[u8]>> {
        let sorted = self.sort_key(key)?;
        self.entries
            .remove(sorted.as_ref())
            .map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Releases every entry together with the container.
    pub fn delete(self) {
        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "store",
            operation = "delete",
            entries = self.entries.len() as u64
        );
    }

    /// Starts a fresh ascending walk. Any cursor handed out earlier goes stale.
    pub fn iterate(&mut self) -> StoreCursor {
        self.generation = self.generation.wrapping_add(1);
        StoreCursor {
            generation: self.generation,
            last: None,
            finished: false,
        }
    }

    /// Advances `cursor`, returning the next `(key, value)` in ascending key
    /// order, or `None` at the end or when the cursor has been superseded.
    pub fn next<'a>(&'a self, cursor: &mut StoreCursor) -> Option<(&'a [u8], &'a [u8])> {
        if cursor.finished || cursor.generation != self.generation {
            cursor.finished = true;
            return None;
        }

        let next = match cursor.last.as_deref() {
            Some(last) => self
                .entries
                .range::<[u8], _>((Bound::Excluded(last), Bound::Unbounded))
                .next(),
            None => self.entries.iter().next(),
        };

        match next {
            Some((sorted, entry)) => {
                cursor.last = Some(sorted.clone());
                Some((entry.key.as_ref(), entry.value.as_ref()))
            }
            None => {
                cursor.finished = true;
                None
            }
        }
    }

    /// Returns the first entry whose key sorts strictly after `after`, or the
    /// smallest entry when `after` is `None`. Does not touch cursor state.
    pub fn seek_after(&self, after: Option<&[u8]>) -> Option<(&[u8], &[u8])> {
        let found = match after {
            Some(key) => {
                let sorted = self.sort_key(key)?;
                self.entries
                    .range::<[u8], _>((Bound::Excluded(sorted.as_ref()), Bound::Unbounded))
                    .next()
            }
            None => self.entries.iter().next(),
        };
        found.map(|(_, entry)| (entry.key.as_ref(), entry.value.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.entries
            .values()
            .map(|entry| (entry.key.as_ref(), entry.value.as_ref()))
    }
}
