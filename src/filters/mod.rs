mod error;
mod escape;

pub use error::{FilterError, FilterResult};

use serde::{Deserialize, Serialize};

/// Growable byte buffer a filter rewrites in place. Its capacity only ever
/// grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueBuffer {
    bytes: Vec<u8>,
}

impl ValueBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    /// Replaces the content with whatever `produce` emits, reserving the
    /// exact size up front so the write itself cannot fail.
    fn rewrite(&mut self, produce: impl Fn(&[u8], &mut dyn FnMut(&[u8]))) -> FilterResult<()> {
        let mut needed = 0usize;
        produce(&self.bytes, &mut |part: &[u8]| needed += part.len());
        if needed == self.bytes.len() {
            return Ok(());
        }

        let mut out = Vec::new();
        out.try_reserve_exact(needed.max(self.bytes.capacity()))
            .map_err(|source| FilterError::Exhausted {
                requested: needed,
                source,
            })?;
        produce(&self.bytes, &mut |part: &[u8]| out.extend_from_slice(part));
        self.bytes = out;
        Ok(())
    }
}

impl From<Vec<u8>> for ValueBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ValueBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<&str> for ValueBuffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

/// The fixed set of value transforms, looked up by exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    JsonEncode,
    ShellEscape,
    ShellDqEscape,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Self::JsonEncode, Self::ShellEscape, Self::ShellDqEscape];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jsonencode" => Some(Self::JsonEncode),
            "shellescape" => Some(Self::ShellEscape),
            "shelldqescape" => Some(Self::ShellDqEscape),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::JsonEncode => "jsonencode",
            Self::ShellEscape => "shellescape",
            Self::ShellDqEscape => "shelldqescape",
        }
    }

    pub fn apply(self, buffer: &mut ValueBuffer) -> FilterResult<()> {
        tracing::event!(
            tracing::Level::TRACE,
            subsystem = "filter",
            filter = self.name(),
            len = buffer.len() as u64,
            "filter executing"
        );

        match self {
            Self::JsonEncode => buffer.rewrite(|input, emit| escape::json(input, emit)),
            Self::ShellEscape => buffer.rewrite(|input, emit| {
                escape::backslash(input, escape::SHELL_METACHARACTERS, emit)
            }),
            Self::ShellDqEscape => buffer.rewrite(|input, emit| {
                escape::backslash(input, escape::SHELL_DQ_METACHARACTERS, emit)
            }),
        }
    }
}

/// Applies the filter called `name`. `Ok(None)` means no filter has that name
/// and the buffer was left alone.
pub fn apply_filter(name: &str, buffer: &mut ValueBuffer) -> FilterResult<Option<Filter>> {
    let Some(filter) = Filter::from_name(name) else {
        tracing::event!(
            tracing::Level::DEBUG,
            subsystem = "filter",
            filter = name,
            "unknown filter"
        );
        return Ok(None);
    };
    filter.apply(buffer)?;
    Ok(Some(filter))
}
