mod base;
mod error;
mod grammar;
mod registry;

pub use error::{PatternError, PatternResult};
pub use grammar::{Directive, DirectiveGrammar};
pub use registry::PatternRegistry;
