use super::expand::Expansion;
use super::{CompileError, CompileFlags, CompileResult, Grok, GrokOptions};
use crate::capture::CaptureRegistry;
use crate::matcher::{self, MatchOutcome};
use crate::pattern::{DirectiveGrammar, PatternRegistry};
use crate::types::EngineSlot;
use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// A pattern expanded into one regex, together with the captures it tracks.
///
/// Immutable once built apart from [`CompiledPattern::captures_mut`], so it can
/// be shared by reference across threads; every match gets its own
/// [`MatchResult`](crate::matcher::MatchResult).
#[derive(Debug)]
pub struct CompiledPattern {
    source: String,
    expanded: String,
    regex: Regex,
    max_slot: EngineSlot,
    captures: CaptureRegistry,
    patterns: Arc<RwLock<PatternRegistry>>,
    grammar: Arc<DirectiveGrammar>,
    options: GrokOptions,
    depth: u32,
}

fn engine_builder(text: &str, options: &GrokOptions) -> RegexBuilder {
    let mut builder = RegexBuilder::new(text);
    builder
        .case_insensitive(options.flags.contains(CompileFlags::CASE_INSENSITIVE))
        .multi_line(options.flags.contains(CompileFlags::MULTI_LINE))
        .dot_matches_new_line(options.flags.contains(CompileFlags::DOT_MATCHES_NEW_LINE))
        .ignore_whitespace(options.flags.contains(CompileFlags::IGNORE_WHITESPACE));
    if let Some(limit) = options.size_limit {
        builder.size_limit(limit);
    }
    builder
}

/// Byte offset of the first syntax error in `text`, as reported by the parser
/// the engine itself uses.
fn syntax_error_offset(text: &str, options: &GrokOptions) -> Option<usize> {
    let mut parser = regex_syntax::ParserBuilder::new()
        .case_insensitive(options.flags.contains(CompileFlags::CASE_INSENSITIVE))
        .multi_line(options.flags.contains(CompileFlags::MULTI_LINE))
        .dot_matches_new_line(options.flags.contains(CompileFlags::DOT_MATCHES_NEW_LINE))
        .ignore_whitespace(options.flags.contains(CompileFlags::IGNORE_WHITESPACE))
        .build();
    match parser.parse(text) {
        Ok(_) => None,
        Err(regex_syntax::Error::Parse(err)) => Some(err.span().start.offset),
        Err(regex_syntax::Error::Translate(err)) => Some(err.span().start.offset),
        Err(_) => None,
    }
}

impl CompiledPattern {
    /// Hands the expanded text to the engine, then binds every pending
    /// capture to the slot the engine gave its label.
    pub(crate) fn bind(
        grok: &Grok,
        source: &str,
        expansion: Expansion,
        only_renamed: bool,
    ) -> CompileResult<Self> {
        let options = grok.options().clone();
        let regex = engine_builder(&expansion.text, &options)
            .build()
            .map_err(|err| CompileError::EngineSyntax {
                message: err.to_string(),
                offset: syntax_error_offset(&expansion.text, &options),
                expanded: expansion.text.clone(),
            })?;

        let mut captures = CaptureRegistry::new();
        {
            let slots: FastHashMap<&str, EngineSlot> = regex
                .capture_names()
                .enumerate()
                .filter_map(|(slot, name)| name.map(|name| (name, slot)))
                .collect();

            for (index, pending) in expansion.captures.into_iter().enumerate() {
                let label = expansion
                    .labels
                    .at(index)
                    .and_then(|raw| std::str::from_utf8(raw).ok())
                    .unwrap_or_default();
                let Some(&slot) = slots.get(label) else {
                    return Err(CompileError::UnboundCapture {
                        label: label.to_string(),
                    });
                };
                captures.add(pending.bind(slot), only_renamed)?;
            }
        }

        let max_slot = regex.captures_len().saturating_sub(1);
        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "compile",
            depth = grok.depth() as u64,
            captures = captures.len() as u64,
            max_slot = max_slot as u64,
            "pattern compiled"
        );

        Ok(Self {
            source: source.to_string(),
            expanded: expansion.text,
            regex,
            max_slot,
            captures,
            patterns: grok.patterns(),
            grammar: grok.grammar(),
            options,
            depth: grok.depth(),
        })
    }

    /// The pattern as the caller wrote it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The fully expanded regex handed to the engine.
    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn max_slot(&self) -> EngineSlot {
        self.max_slot
    }

    pub fn captures(&self) -> &CaptureRegistry {
        &self.captures
    }

    pub fn captures_mut(&mut self) -> &mut CaptureRegistry {
        &mut self.captures
    }

    pub fn options(&self) -> &GrokOptions {
        &self.options
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// A compiler sharing this pattern's registry, with no captures of its own
    /// and one more level of trace depth.
    pub fn nested(&self) -> Grok {
        Grok::from_parts(
            self.patterns.clone(),
            self.grammar.clone(),
            self.options.clone(),
            self.depth + 1,
        )
    }

    /// Runs the pattern against `subject`. `Ok(None)` is an ordinary miss.
    pub fn exec<'p, 's>(&'p self, subject: &'s str) -> MatchOutcome<'p, 's> {
        matcher::execute(self, subject)
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }
}
