pub mod capture;
pub mod errors;
pub mod filters;
pub mod grok;
pub mod matcher;
pub mod pattern;
pub mod store;
pub mod types;

pub use capture::{CaptureDescriptor, CaptureRegistry, PredicateRef};
pub use errors::{GrokError, GrokResult};
pub use filters::{Filter, ValueBuffer, apply_filter};
pub use grok::{CompileError, CompileFlags, CompiledPattern, Grok, GrokOptions, Pile};
pub use matcher::{CaptureItem, MatchError, MatchResult};
pub use pattern::{DirectiveGrammar, PatternRegistry};
pub use store::{BlockList, KeyOrder, OrderedStore};
