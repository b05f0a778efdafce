use super::{PatternError, PatternResult};
use crate::store::OrderedStore;
use std::path::Path;

/// Library of named pattern texts, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    store: OrderedStore,
}

pub(crate) fn validate_name(name: &str) -> PatternResult<()> {
    if name.is_empty() {
        return Err(PatternError::EmptyName);
    }
    if let Some(invalid) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(PatternError::InvalidName {
            name: name.to_string(),
            invalid,
        });
    }
    Ok(())
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self {
            store: OrderedStore::lexicographic(),
        }
    }

    /// A registry preloaded with the built-in base library.
    pub fn with_base_patterns() -> PatternResult<Self> {
        let mut registry = Self::new();
        registry.import_str(super::base::BASE_PATTERNS)?;
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Stores `text` under `name`, replacing any earlier definition.
    pub fn add(&mut self, name: &str, text: &str) -> PatternResult<()> {
        validate_name(name)?;
        self.store.put(name.as_bytes(), text.as_bytes())?;
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.store
            .get(name.as_bytes())
            .and_then(|raw| std::str::from_utf8(raw).ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name.as_bytes())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.store
            .remove(name.as_bytes())
            .and_then(|raw| String::from_utf8(raw.into_vec()).ok())
    }

    /// `(name, text)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.store.iter().filter_map(|(name, text)| {
            Some((
                std::str::from_utf8(name).ok()?,
                std::str::from_utf8(text).ok()?,
            ))
        })
    }

    /// Loads definitions written one per line as `NAME REGEX`. Blank lines
    /// and lines starting with `#` are skipped. Returns the number of
    /// definitions added.
    #[tracing::instrument(
        level = "trace",
        skip(self, source),
        fields(subsystem = "patterns", bytes = source.len() as u64)
    )]
    pub fn import_str(&mut self, source: &str) -> PatternResult<usize> {
        let mut added = 0usize;

        for (index, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(split) = line.find(|c: char| c.is_ascii_whitespace()) else {
                return Err(PatternError::InvalidLine {
                    line: index + 1,
                    content: raw_line.to_string(),
                });
            };
            let (name, text) = line.split_at(split);
            let text = text.trim_start();
            if text.is_empty() || validate_name(name).is_err() {
                return Err(PatternError::InvalidLine {
                    line: index + 1,
                    content: raw_line.to_string(),
                });
            }

            self.add(name, text)?;
            added += 1;
        }

        Ok(added)
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> PatternResult<usize> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self.import_str(&source)?;
        tracing::event!(
            tracing::Level::DEBUG,
            subsystem = "patterns",
            path = %path.display(),
            added = added as u64,
            "imported pattern file"
        );
        Ok(added)
    }
}
