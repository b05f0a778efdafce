use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("could not grow value buffer by {requested} bytes")]
    Exhausted {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

pub type FilterResult<T> = Result<T, FilterError>;
