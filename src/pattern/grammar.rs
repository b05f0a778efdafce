use super::{PatternError, PatternResult};
use memchr::memmem;
use regex::{CaptureLocations, Regex};
use std::ops::Range;
use std::sync::{Arc, OnceLock};

/// `%{PATTERN[:SUBNAME][=INLINE | ;LIBRARY(DEFINITION)]}` or a raw engine
/// group opener `(?P<name>` / `(?<name>`.
const DIRECTIVE_REGEX: &str = r"%\{(?P<name>(?P<pattern>[A-Za-z0-9_]+)(?::(?P<subname>[A-Za-z0-9_.@/:-]+))?)(?:=(?P<inline>(?:[^{}\\]|\\.|\{[^{}]*\})+)|;(?P<predicate>[A-Za-z_][A-Za-z0-9_]*)\((?P<definition>[^)]*)\))?\}|\(\?P?<(?P<group>[A-Za-z_][A-Za-z0-9_]*)>";

#[derive(Debug, Clone, Copy)]
struct GrammarSlots {
    name: usize,
    pattern: usize,
    subname: usize,
    inline: usize,
    predicate: usize,
    definition: usize,
    group: usize,
}

/// One directive found in pattern text. `span` covers the directive itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'t> {
    Reference {
        span: Range<usize>,
        name: &'t str,
        pattern: &'t str,
        subname: Option<&'t str>,
        inline: Option<&'t str>,
        predicate: Option<(&'t str, &'t str)>,
    },
    NamedGroup {
        span: Range<usize>,
        name: &'t str,
    },
    /// A reference behind an odd run of backslashes. `span` includes the
    /// escaping backslash; `text` is the directive without it.
    Escaped {
        span: Range<usize>,
        text: &'t str,
    },
}

impl Directive<'_> {
    pub fn span(&self) -> Range<usize> {
        match self {
            Directive::Reference { span, .. } => span.clone(),
            Directive::NamedGroup { span, .. } => span.clone(),
            Directive::Escaped { span, .. } => span.clone(),
        }
    }
}

/// Compiled directive grammar plus the engine slot of each grammar field.
///
/// Build one with [`DirectiveGrammar::new`] and share it, or use the
/// process-wide instance from [`DirectiveGrammar::shared`].
#[derive(Debug)]
pub struct DirectiveGrammar {
    regex: Regex,
    slots: GrammarSlots,
}

static SHARED: OnceLock<Arc<DirectiveGrammar>> = OnceLock::new();

fn slot_for(regex: &Regex, field: &str) -> PatternResult<usize> {
    regex
        .capture_names()
        .position(|name| name == Some(field))
        .ok_or_else(|| PatternError::Grammar {
            message: format!("grammar has no '{field}' group"),
        })
}

impl DirectiveGrammar {
    pub fn new() -> PatternResult<Self> {
        let regex = Regex::new(DIRECTIVE_REGEX).map_err(|err| PatternError::Grammar {
            message: err.to_string(),
        })?;
        let slots = GrammarSlots {
            name: slot_for(&regex, "name")?,
            pattern: slot_for(&regex, "pattern")?,
            subname: slot_for(&regex, "subname")?,
            inline: slot_for(&regex, "inline")?,
            predicate: slot_for(&regex, "predicate")?,
            definition: slot_for(&regex, "definition")?,
            group: slot_for(&regex, "group")?,
        };
        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "compile",
            "directive grammar initialized"
        );
        Ok(Self { regex, slots })
    }

    pub fn shared() -> Arc<DirectiveGrammar> {
        SHARED
            .get_or_init(|| {
                let grammar = DirectiveGrammar::new();
                Arc::new(grammar.expect("directive grammar should compile"))
            })
            .clone()
    }

    /// Finds the first directive starting at or after `from`.
    ///
    /// A directive behind an odd number of backslashes is escaped: references
    /// come back as [`Directive::Escaped`] and group openers are skipped. An
    /// even run is a sequence of escaped backslashes and leaves the directive
    /// live.
    pub fn next_directive<'t>(&self, text: &'t str, from: usize) -> Option<Directive<'t>> {
        let bytes = text.as_bytes();
        let mut at = from;
        let mut locations = self.regex.capture_locations();

        while at <= text.len() {
            let rest = &bytes[at..];
            if memmem::find(rest, b"%{").is_none() && memmem::find(rest, b"(?").is_none() {
                return None;
            }

            let found = self.regex.captures_read_at(&mut locations, text, at)?;
            let start = found.start();
            let escapes = bytes[..start]
                .iter()
                .rev()
                .take_while(|&&byte| byte == b'\\')
                .count();
            if escapes % 2 == 1 {
                if locations.get(self.slots.group).is_some() {
                    at = start + 1;
                    continue;
                }
                return Some(Directive::Escaped {
                    span: start - 1..found.end(),
                    text: found.as_str(),
                });
            }

            return Some(self.directive_at(text, found.range(), &locations));
        }
        None
    }

    fn directive_at<'t>(
        &self,
        text: &'t str,
        span: Range<usize>,
        locations: &CaptureLocations,
    ) -> Directive<'t> {
        let field = |slot: usize| locations.get(slot).map(|(start, end)| &text[start..end]);

        if let Some(name) = field(self.slots.group) {
            return Directive::NamedGroup { span, name };
        }

        let definition = field(self.slots.definition).unwrap_or_default();
        let predicate = field(self.slots.predicate).map(|library| (library, definition));

        Directive::Reference {
            span,
            name: field(self.slots.name).unwrap_or_default(),
            pattern: field(self.slots.pattern).unwrap_or_default(),
            subname: field(self.slots.subname),
            inline: field(self.slots.inline),
            predicate,
        }
    }
}
