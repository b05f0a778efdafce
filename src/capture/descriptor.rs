use crate::types::{CaptureId, EngineSlot};
use serde::{Deserialize, Serialize};

/// Validation hook named at a directive site, e.g. `;range(1,65535)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateRef {
    pub library: String,
    pub definition: String,
}

/// Metadata for one named capture of a compiled pattern.
///
/// `name` is `PATTERN` or `PATTERN:SUBNAME` as written in the directive; raw
/// engine groups such as `(?P<host>...)` are named `:host`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDescriptor {
    pub(crate) id: CaptureId,
    pub(crate) name: String,
    pub(crate) subname: String,
    pub(crate) pattern: String,
    pub(crate) slot: EngineSlot,
    pub(crate) predicate: Option<PredicateRef>,
    pub(crate) extra: Option<Box<[u8]>>,
}

impl CaptureDescriptor {
    pub fn new(
        id: CaptureId,
        name: impl Into<String>,
        subname: impl Into<String>,
        pattern: impl Into<String>,
        slot: EngineSlot,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subname: subname.into(),
            pattern: pattern.into(),
            slot,
            predicate: None,
            extra: None,
        }
    }

    pub fn with_predicate(mut self, predicate: PredicateRef) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn id(&self) -> CaptureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subname(&self) -> &str {
        &self.subname
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn slot(&self) -> EngineSlot {
        self.slot
    }

    pub fn predicate(&self) -> Option<&PredicateRef> {
        self.predicate.as_ref()
    }

    pub fn extra(&self) -> Option<&[u8]> {
        self.extra.as_deref()
    }

    /// True when the directive gave the capture an alias.
    #[inline]
    pub fn is_renamed(&self) -> bool {
        !self.subname.is_empty()
    }
}
