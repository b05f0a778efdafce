use crate::capture::{CaptureDescriptor, CaptureWalk};
use crate::grok::CompiledPattern;
use crate::types::{ByteSpan, EngineSlot};
use regex::CaptureLocations;
use std::collections::HashMap;

/// One capture produced by a walk: the descriptor and where it matched.
///
/// `span` and `text` are `None` when the engine left the slot unmatched, e.g.
/// an optional group that did not participate.
#[derive(Debug, Clone, Copy)]
pub struct CaptureItem<'p, 's> {
    pub descriptor: &'p CaptureDescriptor,
    pub span: Option<ByteSpan>,
    pub text: Option<&'s str>,
}

impl<'p, 's> CaptureItem<'p, 's> {
    pub fn name(&self) -> &'p str {
        self.descriptor.name()
    }
}

/// A successful match of a [`CompiledPattern`] against one subject.
///
/// Owns its offset vector; matching again always produces a new result.
#[derive(Debug)]
pub struct MatchResult<'p, 's> {
    pattern: &'p CompiledPattern,
    subject: &'s str,
    locations: CaptureLocations,
    whole: (usize, usize),
    walk: Option<CaptureWalk>,
}

impl<'p, 's> MatchResult<'p, 's> {
    pub(crate) fn new(
        pattern: &'p CompiledPattern,
        subject: &'s str,
        locations: CaptureLocations,
        whole: (usize, usize),
    ) -> Self {
        Self {
            pattern,
            subject,
            locations,
            whole,
            walk: None,
        }
    }

    pub fn pattern(&self) -> &'p CompiledPattern {
        self.pattern
    }

    pub fn subject(&self) -> &'s str {
        self.subject
    }

    /// `[start, end)` of the whole match.
    pub fn find_index(&self) -> (usize, usize) {
        self.whole
    }

    /// `(offset, length)` of an engine slot, `None` when it did not participate.
    pub fn span(&self, slot: EngineSlot) -> Option<ByteSpan> {
        self.locations
            .get(slot)
            .map(|(start, end)| (start, end - start))
    }

    fn text_of(&self, span: Option<ByteSpan>) -> Option<&'s str> {
        let (start, len) = span?;
        self.subject.get(start..start.saturating_add(len))
    }

    /// Resolves `name` by capture name first, then by subname.
    pub fn named_capture(&self, name: &str) -> Option<&'p CaptureDescriptor> {
        let captures = self.pattern.captures();
        captures
            .get_by_name(name)
            .or_else(|| captures.get_by_subname(name))
    }

    pub fn named_substring(&self, name: &str) -> Option<ByteSpan> {
        let descriptor = self.named_capture(name)?;
        self.span(descriptor.slot())
    }

    pub fn named_str(&self, name: &str) -> Option<&'s str> {
        self.text_of(self.named_substring(name))
    }

    /// Starts a walk over every capture in ascending id order, ending any
    /// walk already in progress.
    pub fn walk_init(&mut self) {
        if let Some(previous) = self.walk.take() {
            self.pattern.captures().walk_end(previous);
        }
        self.walk = Some(self.pattern.captures().walk_init());
    }

    pub fn walk_next(&mut self) -> Option<CaptureItem<'p, 's>> {
        let pattern = self.pattern;
        let walk = self.walk.as_mut()?;
        let descriptor = pattern.captures().walk_next(walk)?;
        let span = self.span(descriptor.slot());
        Some(CaptureItem {
            descriptor,
            span,
            text: self.text_of(span),
        })
    }

    pub fn walk_end(&mut self) {
        if let Some(walk) = self.walk.take() {
            self.pattern.captures().walk_end(walk);
        }
    }

    /// Every capture in ascending id order, without touching the walk cursor.
    pub fn walk(&self) -> impl Iterator<Item = CaptureItem<'p, 's>> + '_ {
        self.pattern.captures().iter().map(move |descriptor| {
            let span = self.span(descriptor.slot());
            CaptureItem {
                descriptor,
                span,
                text: self.text_of(span),
            }
        })
    }

    /// Capture name to matched text, in walk order. Unmatched captures
    /// contribute an empty string.
    pub fn captures(&self) -> HashMap<String, Vec<String>> {
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        for item in self.walk() {
            out.entry(item.name().to_string())
                .or_default()
                .push(item.text.unwrap_or_default().to_string());
        }
        out
    }

    /// Writes renamed captures into `map`, keyed by the part of the name after
    /// its first `:`. Later captures overwrite earlier ones.
    pub fn capture_into_map(&self, map: &mut HashMap<String, String>) {
        for item in self.walk() {
            if !item.descriptor.is_renamed() {
                continue;
            }
            let key = match item.name().split_once(':') {
                Some((_, alias)) => alias,
                None => item.name(),
            };
            map.insert(key.to_string(), item.text.unwrap_or_default().to_string());
        }
    }
}
