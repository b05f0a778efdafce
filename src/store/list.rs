use super::{StoreError, StoreResult, copy_blob};

/// Insertion-ordered, index-addressable sequence of owned byte blocks.
///
/// Out-of-range indices are lookup misses: `at` and `remove_at` return
/// `None`, `overwrite_at` does nothing.
#[derive(Debug, Default, Clone)]
pub struct BlockList {
    blocks: Vec<Box<[u8]>>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(&mut self, block: &[u8]) -> StoreResult<()> {
        let owned = copy_blob(block)?;
        self.blocks
            .try_reserve(1)
            .map_err(|source| StoreError::Exhausted {
                requested: std::mem::size_of::<Box<[u8]>>(),
                source,
            })?;
        self.blocks.push(owned);
        Ok(())
    }

    pub fn overwrite_at(&mut self, index: usize, block: &[u8]) -> StoreResult<()> {
        if let Some(slot) = self.blocks.get_mut(index) {
            *slot = copy_blob(block)?;
        }
        Ok(())
    }

    /// Takes the block at `index` out of the list; later blocks shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<Box<[u8]>> {
        if index < self.blocks.len() {
            Some(self.blocks.remove(index))
        } else {
            None
        }
    }

    pub fn at(&self, index: usize) -> Option<&[u8]> {
        self.blocks.get(index).map(|block| block.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.blocks.iter().map(|block| block.as_ref())
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
