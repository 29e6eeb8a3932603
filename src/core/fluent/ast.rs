//! Fluent resource AST, restricted to the shapes the extractor can produce.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::core::ExtractionError;

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").unwrap());

/// A name valid under Fluent's `Identifier` production.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, ExtractionError> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(ExtractionError::InvalidIdentifier { name })
        }
    }

    pub fn is_valid(name: &str) -> bool {
        IDENTIFIER_REGEX.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// String or number literal. Numbers keep their textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallArguments {
    pub positional: Vec<InlineExpression>,
    pub named: Vec<NamedArgument>,
}

/// A builtin function call such as `NUMBER($x, style: "percent")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineExpression {
    Literal(Literal),
    VariableReference(Identifier),
    FunctionReference(FunctionReference),
}

/// What a select expression branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Variable(Identifier),
    Function(FunctionReference),
}

impl From<Selector> for InlineExpression {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Variable(id) => InlineExpression::VariableReference(id),
            Selector::Function(function) => InlineExpression::FunctionReference(function),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKey {
    Identifier(Identifier),
    Number(String),
}

impl VariantKey {
    /// The key as written in a JavaScript variants object.
    pub fn name(&self) -> &str {
        match self {
            VariantKey::Identifier(id) => id.as_str(),
            VariantKey::Number(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectExpression {
    pub selector: Selector,
    pub variants: Vec<Variant>,
}

impl SelectExpression {
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Inline(InlineExpression),
    Select(SelectExpression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    Text(String),
    Placeable(Expression),
}

impl PatternElement {
    pub fn text(value: impl Into<String>) -> Self {
        PatternElement::Text(value.into())
    }

    pub fn inline(expression: InlineExpression) -> Self {
        PatternElement::Placeable(Expression::Inline(expression))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>) -> Self {
        Self { elements }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Identifier,
    pub value: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    pub body: Vec<Message>,
}

impl Resource {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Render a JavaScript numeric literal as a Fluent number literal.
///
/// Output is always plain decimal: Fluent number literals have no exponent form, so
/// `1e21` renders as `1000000000000000000000` where JavaScript's `String` gives
/// `"1e+21"`.
pub fn format_number(value: f64) -> String {
    value.to_string()
}
