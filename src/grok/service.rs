use super::expand::Expander;
use super::{CompileResult, CompiledPattern, GrokOptions};
use crate::pattern::{DirectiveGrammar, PatternRegistry, PatternResult};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// Compiler host: owns the pattern library and the options every
/// compilation runs with.
///
/// The library sits behind a lock so inline `%{NAME=REGEX}` definitions made
/// during one compilation are visible to the next, including compilations
/// started from a [`CompiledPattern::nested`] host.
#[derive(Debug, Clone)]
pub struct Grok {
    patterns: Arc<RwLock<PatternRegistry>>,
    grammar: Arc<DirectiveGrammar>,
    options: GrokOptions,
    depth: u32,
}

impl Default for Grok {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Grok {
    pub fn new(options: Option<GrokOptions>) -> Self {
        Self::with_registry(PatternRegistry::new(), options)
    }

    /// Host preloaded with the bundled base library (`WORD`, `INT`, `IP`,
    /// `URI`, `HTTPDATE` and friends).
    pub fn with_base_patterns(options: Option<GrokOptions>) -> PatternResult<Self> {
        let registry = PatternRegistry::with_base_patterns()?;
        Ok(Self::with_registry(registry, options))
    }

    pub fn with_registry(registry: PatternRegistry, options: Option<GrokOptions>) -> Self {
        Self::from_parts(
            Arc::new(RwLock::new(registry)),
            DirectiveGrammar::shared(),
            options.unwrap_or_default(),
            0,
        )
    }

    pub(crate) fn from_parts(
        patterns: Arc<RwLock<PatternRegistry>>,
        grammar: Arc<DirectiveGrammar>,
        options: GrokOptions,
        depth: u32,
    ) -> Self {
        Self {
            patterns,
            grammar,
            options,
            depth,
        }
    }

    pub fn options(&self) -> &GrokOptions {
        &self.options
    }

    /// Nesting level, reported as the `depth` field of trace events.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn patterns(&self) -> Arc<RwLock<PatternRegistry>> {
        self.patterns.clone()
    }

    pub(crate) fn grammar(&self) -> Arc<DirectiveGrammar> {
        self.grammar.clone()
    }

    pub fn add_pattern(&self, name: &str, text: &str) -> PatternResult<()> {
        self.patterns.write().add(name, text)
    }

    pub fn add_patterns_from_str(&self, source: &str) -> PatternResult<usize> {
        self.patterns.write().import_str(source)
    }

    pub fn add_patterns_from_file(&self, path: impl AsRef<Path>) -> PatternResult<usize> {
        self.patterns.write().import_file(path)
    }

    pub fn lookup_pattern(&self, name: &str) -> Option<String> {
        self.patterns.read().lookup(name).map(str::to_string)
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.read().len()
    }

    /// A host sharing this one's library one nesting level deeper.
    pub fn nested(&self) -> Grok {
        Self::from_parts(
            self.patterns.clone(),
            self.grammar.clone(),
            self.options.clone(),
            self.depth + 1,
        )
    }

    pub fn compile(&self, pattern: &str) -> CompileResult<CompiledPattern> {
        self.compile_with(pattern, self.options.only_renamed)
    }

    /// Compiles `pattern`, overriding the host's `only_renamed` setting.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(subsystem = "compile", depth = self.depth)
    )]
    pub fn compile_with(
        &self,
        pattern: &str,
        only_renamed: bool,
    ) -> CompileResult<CompiledPattern> {
        self.options.validate()?;

        let expansion = Expander::new(
            &self.grammar,
            &self.patterns,
            pattern,
            self.options.max_expansion_depth,
        )
        .run()?;

        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "compile",
            depth = self.depth as u64,
            expanded_len = expansion.text.len() as u64,
            "pattern expanded"
        );

        CompiledPattern::bind(self, pattern, expansion, only_renamed)
    }
}
