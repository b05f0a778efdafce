use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern name must not be empty")]
    EmptyName,
    #[error("pattern name '{name}' contains invalid character '{invalid}'")]
    InvalidName { name: String, invalid: char },
    #[error("line {line} is not a 'NAME REGEX' pattern definition: '{content}'")]
    InvalidLine { line: usize, content: String },
    #[error("failed to read pattern file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("directive grammar failed to compile: {message}")]
    Grammar { message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type PatternResult<T> = Result<T, PatternError>;
