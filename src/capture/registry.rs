use super::{CaptureDescriptor, CaptureError, CaptureResult};
use crate::store::{OrderedStore, copy_blob};
use crate::types::{CaptureId, EngineSlot};

/// Position of an ascending-by-id walk over a [`CaptureRegistry`].
///
/// Walks are plain values owned by the caller, so any number of them may run
/// over one registry at once; each ends when it is dropped or handed to
/// [`CaptureRegistry::walk_end`]. A single-cursor discipline is kept one
/// level up, by [`MatchResult`](crate::matcher::MatchResult), which holds at
/// most one walk and replaces it on every `walk_init`.
#[derive(Debug, Clone, Default)]
pub struct CaptureWalk {
    last: Option<CaptureId>,
    finished: bool,
}

impl CaptureWalk {
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Capture descriptors of one compilation, indexed four ways.
///
/// `id` and engine slot are unique; the name and subname indices keep the
/// most recent registration when two captures share a key.
#[derive(Debug)]
pub struct CaptureRegistry {
    descriptors: Vec<CaptureDescriptor>,
    // false for captures kept out of the name indices and walks
    listed: Vec<bool>,
    by_id: OrderedStore,
    by_name: OrderedStore,
    by_subname: OrderedStore,
    by_slot: OrderedStore,
}

impl Default for CaptureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn id_key(id: CaptureId) -> [u8; 4] {
    id.to_ne_bytes()
}

#[inline]
fn slot_key(slot: EngineSlot) -> [u8; 4] {
    (slot as u32).to_ne_bytes()
}

#[inline]
fn decode_index(raw: &[u8]) -> Option<usize> {
    let bytes: [u8; 4] = raw.try_into().ok()?;
    Some(u32::from_ne_bytes(bytes) as usize)
}

impl CaptureRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            listed: Vec::new(),
            by_id: OrderedStore::numeric(),
            by_name: OrderedStore::lexicographic(),
            by_subname: OrderedStore::lexicographic(),
            by_slot: OrderedStore::numeric(),
        }
    }

    /// Number of registered captures, listed or not.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Registers `descriptor` by id and engine slot, and by name and subname
    /// unless `only_renamed` is set and the capture has no subname. Such a
    /// capture stays reachable by id and slot but is skipped by name lookups
    /// and walks; `Ok(false)` reports that case.
    pub fn add(
        &mut self,
        descriptor: CaptureDescriptor,
        only_renamed: bool,
    ) -> CaptureResult<bool> {
        let id = descriptor.id;
        if self.by_id.contains_key(&id_key(id)) {
            return Err(CaptureError::DuplicateId { id });
        }
        if let Some(existing) = self.get_by_engine_slot(descriptor.slot) {
            return Err(CaptureError::DuplicateSlot {
                slot: descriptor.slot,
                existing: existing.id,
            });
        }

        let listed = !only_renamed || descriptor.is_renamed();
        let index = (self.descriptors.len() as u32).to_ne_bytes();
        self.by_id.put(&id_key(id), &index)?;
        self.by_slot.put(&slot_key(descriptor.slot), &index)?;
        if listed {
            self.by_name.put(descriptor.name.as_bytes(), &index)?;
            if descriptor.is_renamed() {
                self.by_subname.put(descriptor.subname.as_bytes(), &index)?;
            }
        }

        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "capture",
            operation = "add",
            id = id as u64,
            slot = descriptor.slot as u64,
            listed,
            name = %descriptor.name
        );
        self.descriptors.push(descriptor);
        self.listed.push(listed);
        Ok(listed)
    }

    fn resolve(&self, raw: Option<&[u8]>) -> Option<&CaptureDescriptor> {
        raw.and_then(decode_index)
            .and_then(|index| self.descriptors.get(index))
    }

    fn is_listed(&self, raw: &[u8]) -> bool {
        decode_index(raw)
            .and_then(|index| self.listed.get(index))
            .is_some_and(|listed| *listed)
    }

    pub fn get_by_id(&self, id: CaptureId) -> Option<&CaptureDescriptor> {
        self.resolve(self.by_id.get(&id_key(id)))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CaptureDescriptor> {
        self.resolve(self.by_name.get(name.as_bytes()))
    }

    pub fn get_by_subname(&self, subname: &str) -> Option<&CaptureDescriptor> {
        self.resolve(self.by_subname.get(subname.as_bytes()))
    }

    pub fn get_by_engine_slot(&self, slot: EngineSlot) -> Option<&CaptureDescriptor> {
        self.resolve(self.by_slot.get(&slot_key(slot)))
    }

    pub fn walk_init(&self) -> CaptureWalk {
        CaptureWalk::default()
    }

    /// Next listed capture after the walk's position, in ascending id order.
    pub fn walk_next(&self, walk: &mut CaptureWalk) -> Option<&CaptureDescriptor> {
        while !walk.finished {
            let last = walk.last.map(id_key);
            let after = last.as_ref().map(|key| key.as_slice());
            let Some((_, index)) = self.by_id.seek_after(after) else {
                walk.finished = true;
                break;
            };

            let descriptor = self.resolve(Some(index))?;
            walk.last = Some(descriptor.id);
            if self.is_listed(index) {
                return Some(descriptor);
            }
        }
        None
    }

    pub fn walk_end(&self, walk: CaptureWalk) {
        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "capture",
            operation = "walk_end",
            finished = walk.finished,
            last = walk.last.map(u64::from)
        );
    }

    /// Listed descriptors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &CaptureDescriptor> + '_ {
        self.by_id
            .iter()
            .filter(|(_, index)| self.is_listed(index))
            .filter_map(|(_, index)| self.resolve(Some(index)))
    }

    /// Attaches `payload` to the capture registered under `id`, replacing any
    /// earlier payload. Returns `false` when no such capture exists.
    pub fn set_extra(&mut self, id: CaptureId, payload: &[u8]) -> CaptureResult<bool> {
        let Some(index) = self.by_id.get(&id_key(id)).and_then(decode_index) else {
            return Ok(false);
        };
        let owned = copy_blob(payload)?;
        match self.descriptors.get_mut(index) {
            Some(descriptor) => {
                descriptor.extra = Some(owned);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
