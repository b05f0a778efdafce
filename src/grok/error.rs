use super::GrokOptionsError;
use crate::capture::CaptureError;
use crate::pattern::PatternError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("pattern '{pattern}' references unknown pattern '{name}'")]
    UnknownPatternReference { name: String, pattern: String },
    #[error("expansion of '{pattern}' exceeded depth {limit}; directive cycle through {chain}")]
    CycleDetected {
        pattern: String,
        chain: String,
        limit: usize,
    },
    #[error("regex engine rejected expanded pattern (offset {offset:?}): {message}")]
    EngineSyntax {
        message: String,
        offset: Option<usize>,
        expanded: String,
    },
    #[error("internal capture label '{label}' was not bound by the regex engine")]
    UnboundCapture { label: String },
    #[error(transparent)]
    Options(#[from] GrokOptionsError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CompileResult<T> = Result<T, CompileError>;
