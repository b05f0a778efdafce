use crate::capture::CaptureError;
use crate::filters::FilterError;
use crate::grok::{CompileError, GrokOptionsError};
use crate::matcher::MatchError;
use crate::pattern::PatternError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrokError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Options(#[from] GrokOptionsError),
}

pub type GrokResult<T> = Result<T, GrokError>;
