mod error;
mod result;

pub use error::MatchError;
pub use result::{CaptureItem, MatchResult};

use crate::grok::CompiledPattern;

/// `Ok(None)` is an ordinary miss; `Err` means the match could not run.
pub type MatchOutcome<'p, 's> = Result<Option<MatchResult<'p, 's>>, MatchError>;

pub(crate) fn execute<'p, 's>(
    pattern: &'p CompiledPattern,
    subject: &'s str,
) -> MatchOutcome<'p, 's> {
    if let Some(limit) = pattern.options().max_subject_len
        && subject.len() > limit
    {
        tracing::event!(
            tracing::Level::DEBUG,
            subsystem = "match",
            depth = pattern.depth() as u64,
            length = subject.len() as u64,
            limit = limit as u64,
            "subject rejected"
        );
        return Err(MatchError::SubjectTooLong {
            length: subject.len(),
            limit,
        });
    }

    // one offset pair per engine slot, owned by the result
    let mut locations = pattern.regex().capture_locations();
    let found = pattern.regex().captures_read(&mut locations, subject);

    tracing::event!(
        tracing::Level::TRACE,
        subsystem = "match",
        depth = pattern.depth() as u64,
        subject_len = subject.len() as u64,
        matched = found.is_some(),
        "pattern executed"
    );

    match found {
        Some(whole) => {
            let span = (whole.start(), whole.end());
            Ok(Some(MatchResult::new(pattern, subject, locations, span)))
        }
        None => Ok(None),
    }
}
