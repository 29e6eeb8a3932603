//! Error taxonomy for the extraction pipeline.
//!
//! Every variant is fatal to the module being extracted. The messages are part of the
//! tool's user-visible contract and are matched verbatim by tests, so keep the wording
//! stable.

use thiserror::Error;

use crate::core::SourceLocation;

/// Errors raised while turning a `createMessage(...)` call into a Fluent message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Configuration does not name an output file.
    #[error("output option is required")]
    MissingOutputPath,

    /// A selector message was called without its variants argument.
    #[error("Selector must provide a variants object")]
    MissingVariants,

    /// The variants argument is not an object literal.
    #[error("Invalid variants argument. expecting Record<string, string>")]
    InvalidVariantsType,

    /// A variant key is neither an identifier nor a numeric literal.
    #[error("Invalid variant key: '{key}'")]
    InvalidVariantKey { key: String },

    /// A variant (or formatter option) value has an unsupported shape.
    #[error("Invalid variant value: '{value}'")]
    InvalidVariantValue { value: String },

    /// The explicit default variant argument is not a string literal.
    #[error("default variant must be string literal")]
    InvalidDefaultVariantType,

    /// The explicit default variant does not name one of the variants.
    #[error("property '{key}' does not exist on variants")]
    UnknownDefaultVariant { key: String },

    /// No explicit default and no `other` variant.
    #[error("Selector must provide explicit default variant, or a variant named `other`")]
    MissingDefaultVariant,

    /// The selector is neither an identifier nor a builtin constructor call.
    #[error("Invalid selector. expecting identifier or new Fluent*")]
    InvalidSelector,

    /// A constructor call names a class with no Fluent builtin counterpart.
    #[error("Unexpected class name: {name}")]
    UnknownBuiltin { name: String },

    /// The first `createMessage` argument is not a literal, template, identifier or
    /// constructor call.
    #[error("Unsupported message argument: '{code}'")]
    UnsupportedMessageShape { code: String },

    /// A name that must become a Fluent identifier does not match Fluent's grammar.
    #[error("Invalid Fluent identifier: '{name}'")]
    InvalidIdentifier { name: String },

    /// The options argument of a builtin constructor is not an object literal.
    #[error("Invalid formatter options: '{code}'. expecting an object literal")]
    InvalidFormatterOptions { code: String },

    /// The source renderer could not produce text for a node.
    #[error("Failed to render node to source text: {reason}")]
    HashingPrecondition { reason: String },
}

/// An [`ExtractionError`] pinned to the call site that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {error}")]
pub struct CallSiteError {
    pub location: SourceLocation,
    /// The line of source containing the call, for report context.
    pub source_line: String,
    #[source]
    pub error: ExtractionError,
}
