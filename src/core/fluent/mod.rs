//! Fluent AST and serializer.

pub mod ast;
pub mod serializer;

pub use ast::{
    CallArguments, Expression, FunctionReference, Identifier, InlineExpression, Literal, Message,
    NamedArgument, Pattern, PatternElement, Resource, SelectExpression, Selector, Variant,
    VariantKey, format_number,
};
pub use serializer::serialize;
