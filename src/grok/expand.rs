use super::{CompileError, CompileResult};
use crate::capture::{CaptureDescriptor, PredicateRef};
use crate::pattern::{Directive, DirectiveGrammar, PatternRegistry};
use crate::store::BlockList;
use crate::types::{CaptureId, EngineSlot};
use parking_lot::RwLock;
use smallvec::SmallVec;

/// Prefix of the engine group labels the expander assigns. User-written
/// named groups are relabelled too, so these never collide.
pub(crate) const LABEL_PREFIX: &str = "__grok";

/// A capture registered during expansion whose engine slot is not yet known.
#[derive(Debug)]
pub(crate) struct PendingCapture {
    id: CaptureId,
    name: String,
    subname: String,
    pattern: String,
    predicate: Option<PredicateRef>,
}

impl PendingCapture {
    pub(crate) fn bind(self, slot: EngineSlot) -> CaptureDescriptor {
        let Self {
            id,
            name,
            subname,
            pattern,
            predicate,
        } = self;
        let descriptor = CaptureDescriptor::new(id, name, subname, pattern, slot);
        match predicate {
            Some(predicate) => descriptor.with_predicate(predicate),
            None => descriptor,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Expansion {
    pub(crate) text: String,
    pub(crate) captures: Vec<PendingCapture>,
    // engine label of `captures[i]` is block `i`
    pub(crate) labels: BlockList,
}

pub(crate) struct Expander<'g> {
    grammar: &'g DirectiveGrammar,
    patterns: &'g RwLock<PatternRegistry>,
    source: &'g str,
    limit: usize,
    next_id: CaptureId,
    captures: Vec<PendingCapture>,
    labels: BlockList,
    chain: SmallVec<[String; 8]>,
}

impl<'g> Expander<'g> {
    pub(crate) fn new(
        grammar: &'g DirectiveGrammar,
        patterns: &'g RwLock<PatternRegistry>,
        source: &'g str,
        limit: usize,
    ) -> Self {
        Self {
            grammar,
            patterns,
            source,
            limit,
            next_id: 0,
            captures: Vec::new(),
            labels: BlockList::new(),
            chain: SmallVec::new(),
        }
    }

    pub(crate) fn run(mut self) -> CompileResult<Expansion> {
        let text = self.expand(self.source, 0)?;
        Ok(Expansion {
            text,
            captures: self.captures,
            labels: self.labels,
        })
    }

    fn register(&mut self, pending: PendingCapture) -> CompileResult<String> {
        let label = format!("{LABEL_PREFIX}{}", pending.id);
        self.labels.push(label.as_bytes())?;
        self.captures.push(pending);
        Ok(label)
    }

    fn allocate_id(&mut self) -> CaptureId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn resolve(&self, pattern: &str, inline: Option<&str>) -> CompileResult<String> {
        if let Some(definition) = inline {
            self.patterns.write().add(pattern, definition)?;
            return Ok(definition.to_string());
        }

        match self.patterns.read().lookup(pattern) {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::event!(
                    tracing::Level::DEBUG,
                    subsystem = "compile",
                    pattern = %self.source,
                    missing = %pattern,
                    "unknown pattern reference"
                );
                Err(CompileError::UnknownPatternReference {
                    name: pattern.to_string(),
                    pattern: self.source.to_string(),
                })
            }
        }
    }

    fn expand(&mut self, text: &str, depth: usize) -> CompileResult<String> {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0usize;

        while let Some(directive) = self.grammar.next_directive(text, cursor) {
            let span = directive.span();
            out.push_str(&text[cursor..span.start]);
            cursor = span.end;

            match directive {
                Directive::NamedGroup { name, .. } => {
                    let id = self.allocate_id();
                    let label = self.register(PendingCapture {
                        id,
                        name: format!(":{name}"),
                        subname: name.to_string(),
                        pattern: String::new(),
                        predicate: None,
                    })?;
                    out.push_str("(?P<");
                    out.push_str(&label);
                    out.push('>');
                }
                Directive::Escaped { text: literal, .. } => {
                    out.push_str(&regex::escape(literal));
                }
                Directive::Reference {
                    name,
                    pattern,
                    subname,
                    inline,
                    predicate,
                    ..
                } => {
                    let body = self.resolve(pattern, inline)?;

                    if depth + 1 > self.limit {
                        let mut chain = self.chain.join(" -> ");
                        if !chain.is_empty() {
                            chain.push_str(" -> ");
                        }
                        chain.push_str(pattern);
                        tracing::event!(
                            tracing::Level::DEBUG,
                            subsystem = "compile",
                            pattern = %self.source,
                            limit = self.limit as u64,
                            "expansion depth exceeded"
                        );
                        return Err(CompileError::CycleDetected {
                            pattern: self.source.to_string(),
                            chain,
                            limit: self.limit,
                        });
                    }

                    let id = self.allocate_id();
                    let label = self.register(PendingCapture {
                        id,
                        name: name.to_string(),
                        subname: subname.unwrap_or_default().to_string(),
                        pattern: pattern.to_string(),
                        predicate: predicate.map(|(library, definition)| PredicateRef {
                            library: library.to_string(),
                            definition: definition.to_string(),
                        }),
                    })?;

                    self.chain.push(pattern.to_string());
                    let inner = self.expand(&body, depth + 1)?;
                    self.chain.pop();

                    out.push_str("(?P<");
                    out.push_str(&label);
                    out.push('>');
                    out.push_str(&inner);
                    out.push(')');
                }
            }
        }

        out.push_str(&text[cursor..]);
        Ok(out)
    }
}
