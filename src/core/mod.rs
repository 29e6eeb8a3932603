//! Extraction engine.
//!
//! - `parsers`: swc parsing of JS/TS modules
//! - `extract`: call-site recognition and message building
//! - `fluent`: Fluent syntax tree and serializer
//! - `hash`: content-addressed identifiers
//! - `context`: project-level pipeline (scan, parse, extract)
//! - `emit`: merging and writing the output resource
//! - `rewrite`: turning call sites into lookups

pub mod context;
pub mod data;
pub mod emit;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod fluent;
pub mod hash;
pub mod parsers;
pub mod rewrite;

pub use context::{ExtractContext, ModuleResult};
pub use data::{SourceContext, SourceLocation};
pub use error::{CallSiteError, ExtractionError};
