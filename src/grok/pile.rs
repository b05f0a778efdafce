use super::{CompileResult, CompiledPattern, Grok, GrokOptions};
use crate::matcher::{MatchError, MatchResult};
use crate::pattern::{PatternRegistry, PatternResult};
use std::path::{Path, PathBuf};

/// An ordered set of compiled patterns tried one after another.
///
/// Definitions and pattern files are collected first and only applied when
/// a pattern is compiled, so each [`Pile::compile`] sees everything added
/// before it.
#[derive(Debug, Default)]
pub struct Pile {
    patterns: PatternRegistry,
    pattern_files: Vec<PathBuf>,
    compiled: Vec<CompiledPattern>,
    options: GrokOptions,
}

impl Pile {
    pub fn new(options: Option<GrokOptions>) -> Self {
        Self {
            options: options.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn add_pattern(&mut self, name: &str, text: &str) -> PatternResult<()> {
        self.patterns.add(name, text)
    }

    pub fn add_patterns_from_file(&mut self, path: impl AsRef<Path>) {
        self.pattern_files.push(path.as_ref().to_path_buf());
    }

    pub fn compile(&mut self, pattern: &str) -> CompileResult<()> {
        let mut registry = self.patterns.clone();
        for path in &self.pattern_files {
            registry.import_file(path)?;
        }

        let grok = Grok::with_registry(registry, Some(self.options.clone()));
        let compiled = grok.compile(pattern)?;
        self.compiled.push(compiled);
        Ok(())
    }

    /// First pattern, in insertion order, that matches `subject`.
    pub fn exec<'p, 's>(
        &'p self,
        subject: &'s str,
    ) -> Result<Option<(&'p CompiledPattern, MatchResult<'p, 's>)>, MatchError> {
        for compiled in &self.compiled {
            if let Some(found) = compiled.exec(subject)? {
                return Ok(Some((compiled, found)));
            }
        }
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> + '_ {
        self.compiled.iter()
    }
}
