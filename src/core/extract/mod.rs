//! Extraction: from `createMessage(...)` call sites to Fluent messages.
//!
//! - `walker`: gates a module on the hook import and visits its call sites
//! - `message`: builds one message per call
//! - `select`: assembles select expressions from selector/variants arguments
//! - `expression`: resolves literals, templates and builtin constructors

pub mod expression;
pub mod message;
pub mod select;
pub mod walker;

pub use expression::{Binding, ExpressionResolver};
pub use message::{ExtractedMessage, build_message};
pub use select::{SelectOutput, build_select_expression};
pub use walker::{CallPattern, ExtractedCall, ExtractionState, ModuleExtraction, extract_module};
