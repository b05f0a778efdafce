use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EXPANSION_DEPTH_MIN: usize = 1;
const EXPANSION_DEPTH_MAX: usize = 1024;
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 64;

bitflags! {
    /// Flags forwarded to the regex engine when the expanded text is compiled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CompileFlags: u8 {
        const CASE_INSENSITIVE = 0b0000_0001;
        const MULTI_LINE = 0b0000_0010;
        const DOT_MATCHES_NEW_LINE = 0b0000_0100;
        const IGNORE_WHITESPACE = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrokOptions {
    pub only_renamed: bool,
    pub max_expansion_depth: usize,
    pub flags: CompileFlags,
    pub size_limit: Option<usize>,
    pub max_subject_len: Option<usize>,
}

impl Default for GrokOptions {
    fn default() -> Self {
        Self {
            only_renamed: false,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            flags: CompileFlags::empty(),
            size_limit: None,
            max_subject_len: None,
        }
    }
}

impl GrokOptions {
    pub fn builder() -> GrokOptionsBuilder {
        GrokOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), GrokOptionsError> {
        if !(EXPANSION_DEPTH_MIN..=EXPANSION_DEPTH_MAX).contains(&self.max_expansion_depth) {
            return Err(GrokOptionsError::ExpansionDepthOutOfRange {
                value: self.max_expansion_depth,
                min: EXPANSION_DEPTH_MIN,
                max: EXPANSION_DEPTH_MAX,
            });
        }
        if self.size_limit == Some(0) {
            return Err(GrokOptionsError::ZeroSizeLimit);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct GrokOptionsBuilder {
    options: GrokOptions,
}

impl GrokOptionsBuilder {
    pub fn only_renamed(mut self, value: bool) -> Self {
        self.options.only_renamed = value;
        self
    }

    pub fn max_expansion_depth(mut self, value: usize) -> Self {
        self.options.max_expansion_depth = value;
        self
    }

    pub fn flags(mut self, flags: CompileFlags) -> Self {
        self.options.flags = flags;
        self
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        let flags = &mut self.options.flags;
        flags.set(CompileFlags::CASE_INSENSITIVE, value);
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.options.size_limit = Some(bytes);
        self
    }

    pub fn max_subject_len(mut self, bytes: usize) -> Self {
        self.options.max_subject_len = Some(bytes);
        self
    }

    pub fn build(self) -> Result<GrokOptions, GrokOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrokOptionsError {
    #[error("max_expansion_depth {value} is outside the supported range {min}..={max}")]
    ExpansionDepthOutOfRange {
        value: usize,
        min: usize,
        max: usize,
    },
    #[error("size_limit must be greater than zero")]
    ZeroSizeLimit,
}
