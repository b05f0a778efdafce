use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("subject of {length} bytes exceeds the configured limit of {limit} bytes")]
    SubjectTooLong { length: usize, limit: usize },
}
