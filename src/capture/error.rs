use crate::store::StoreError;
use crate::types::{CaptureId, EngineSlot};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture id {id} is already registered")]
    DuplicateId { id: CaptureId },
    #[error("engine slot {slot} is already bound to capture id {existing}")]
    DuplicateSlot {
        slot: EngineSlot,
        existing: CaptureId,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
