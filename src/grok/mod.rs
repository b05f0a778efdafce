mod compiled;
mod error;
mod expand;
mod options;
mod pile;
mod service;

pub use compiled::CompiledPattern;
pub use error::{CompileError, CompileResult};
pub use options::{
    CompileFlags, DEFAULT_MAX_EXPANSION_DEPTH, GrokOptions, GrokOptionsBuilder, GrokOptionsError,
};
pub use pile::Pile;
pub use service::Grok;
