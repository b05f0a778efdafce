use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("numeric store keys must be {expected} bytes wide (got {found})")]
    KeyWidth { expected: usize, found: usize },
    #[error("allocation of {requested} bytes failed")]
    Exhausted {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
