mod error;
mod list;
mod ordered;

pub use error::{StoreError, StoreResult};
pub use list::BlockList;
pub use ordered::{KeyOrder, NUMERIC_KEY_WIDTH, OrderedStore, StoreCursor};

/// Copies `bytes` into a freshly owned blob, surfacing allocation failure
/// instead of aborting.
pub(crate) fn copy_blob(bytes: &[u8]) -> StoreResult<Box<[u8]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|source| StoreError::Exhausted {
            requested: bytes.len(),
            source,
        })?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}
