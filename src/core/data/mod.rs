//! Location data shared by the extraction pipeline and the reporters.

pub mod source;

pub use source::{SourceContext, SourceLocation};
