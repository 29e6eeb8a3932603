//! Content hasher: stable, content-addressed identifiers for source fragments.
//!
//! An identifier is derived from the canonical source text of a node, not from its
//! position, so moving a call around a file (or reformatting it) keeps its id. The
//! text comes from a [`RenderSource`] implementation; [`SnippetRenderer`] reads it back
//! out of the swc `SourceMap` and normalizes whitespace.
//!
//! Digests are SHAKE256 truncated to 5 bytes (10 hex chars, 40 bits). A 50% chance of
//! any collision needs roughly 1.2 million distinct fragments, far beyond the number of
//! messages in one application.

use sha3::{
    Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};
use swc_common::{SourceMap, SourceMapper, Span, Spanned};

use crate::core::ExtractionError;
use crate::core::fluent::Identifier;

/// Number of digest bytes kept in an identifier.
pub const DIGEST_BYTES: usize = 5;

/// Namespace of a synthesized identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    /// Variable bound to a builtin constructor call (`new FluentNumber(...)`).
    Selector,
    /// Variable bound to an interpolated template expression.
    Expression,
    /// Message id.
    Message,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Selector => "selector",
            IdPrefix::Expression => "expression",
            IdPrefix::Message => "message",
        }
    }
}

/// Renders AST nodes back to source text.
///
/// Implementations must be deterministic: the same node always renders to the same text.
pub trait RenderSource {
    /// Source text covered by `span`, as written.
    fn snippet(&self, span: Span) -> Result<String, ExtractionError>;

    /// Canonical text for hashing. Formatting-only differences must render identically.
    fn render(&self, span: Span) -> Result<String, ExtractionError> {
        self.snippet(span).map(|code| canonicalize(&code))
    }
}

/// [`RenderSource`] backed by the `SourceMap` the module was parsed into.
pub struct SnippetRenderer<'a> {
    source_map: &'a SourceMap,
}

impl<'a> SnippetRenderer<'a> {
    pub fn new(source_map: &'a SourceMap) -> Self {
        Self { source_map }
    }
}

impl RenderSource for SnippetRenderer<'_> {
    fn snippet(&self, span: Span) -> Result<String, ExtractionError> {
        self.source_map
            .span_to_snippet(span)
            .map_err(|err| ExtractionError::HashingPrecondition {
                reason: format!("{:?}", err),
            })
    }
}

/// Hashes nodes through an injected renderer.
#[derive(Clone, Copy)]
pub struct ContentHasher<'a> {
    renderer: &'a dyn RenderSource,
}

impl<'a> ContentHasher<'a> {
    pub fn new(renderer: &'a dyn RenderSource) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &'a dyn RenderSource {
        self.renderer
    }

    /// 10-char lowercase hex digest of the node's canonical text.
    pub fn hash<N: Spanned + ?Sized>(&self, node: &N) -> Result<String, ExtractionError> {
        let code = self.renderer.render(node.span())?;
        Ok(digest(&code))
    }

    /// `<prefix>-<hash>` as a Fluent identifier.
    pub fn identifier<N: Spanned + ?Sized>(
        &self,
        node: &N,
        prefix: IdPrefix,
    ) -> Result<Identifier, ExtractionError> {
        let hash = self.hash(node)?;
        Identifier::new(with_prefix(&hash, Some(prefix)))
    }

    /// Source text of a node for error messages. Never fails.
    pub fn describe<N: Spanned + ?Sized>(&self, node: &N) -> String {
        self.renderer
            .snippet(node.span())
            .unwrap_or_else(|_| "<unknown>".to_string())
    }
}

/// SHAKE256 of `text`, truncated to [`DIGEST_BYTES`] and hex encoded.
pub fn digest(text: &str) -> String {
    let mut hasher = Shake256::default();
    hasher.update(text.as_bytes());
    let mut reader = hasher.finalize_xof();
    let mut output = [0u8; DIGEST_BYTES];
    reader.read(&mut output);
    hex::encode(output)
}

pub fn with_prefix(text: &str, prefix: Option<IdPrefix>) -> String {
    match prefix {
        Some(prefix) => format!("{}-{}", prefix.as_str(), text),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Code { depth: usize },
    Template,
}

/// Normalize whitespace in a JavaScript fragment.
///
/// Outside of string and template literals, comments are dropped, whitespace runs
/// collapse, and a separator survives only where removing it would join two tokens
/// (`new Foo`, `a - -b`). Literal contents are copied verbatim, including template
/// text around `${...}` substitutions.
pub fn canonicalize(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut stack = vec![Mode::Code { depth: 0 }];
    let mut pending_space = false;
    let mut chars = code.chars().peekable();

    while let Some(c) = chars.next() {
        let Some(&mode) = stack.last() else {
            break;
        };

        match mode {
            Mode::Template => match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '`' => {
                    out.push(c);
                    stack.pop();
                }
                '$' if chars.peek() == Some(&'{') => {
                    out.push(c);
                    if let Some(brace) = chars.next() {
                        out.push(brace);
                    }
                    stack.push(Mode::Code { depth: 0 });
                }
                _ => out.push(c),
            },
            Mode::Code { depth } => {
                if c.is_whitespace() {
                    pending_space = true;
                    continue;
                }
                if c == '/' && chars.peek() == Some(&'/') {
                    while chars.peek().is_some_and(|next| *next != '\n') {
                        chars.next();
                    }
                    pending_space = true;
                    continue;
                }
                if c == '/' && chars.peek() == Some(&'*') {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                    pending_space = true;
                    continue;
                }

                if pending_space && out.chars().last().is_some_and(|prev| needs_separator(prev, c))
                {
                    out.push(' ');
                }
                pending_space = false;

                match c {
                    '\'' | '"' => {
                        out.push(c);
                        while let Some(next) = chars.next() {
                            out.push(next);
                            if next == '\\' {
                                if let Some(escaped) = chars.next() {
                                    out.push(escaped);
                                }
                            } else if next == c {
                                break;
                            }
                        }
                    }
                    '`' => {
                        out.push(c);
                        stack.push(Mode::Template);
                    }
                    '{' => {
                        set_depth(&mut stack, depth + 1);
                        out.push(c);
                    }
                    '}' if depth == 0 && stack.len() > 1 => {
                        // closes a `${` substitution
                        out.push(c);
                        stack.pop();
                    }
                    '}' => {
                        set_depth(&mut stack, depth.saturating_sub(1));
                        out.push(c);
                    }
                    _ => out.push(c),
                }
            }
        }
    }

    out
}

fn set_depth(stack: &mut [Mode], value: usize) {
    if let Some(Mode::Code { depth }) = stack.last_mut() {
        *depth = value;
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn needs_separator(prev: char, next: char) -> bool {
    (is_word_char(prev) && is_word_char(next)) || (prev == next && matches!(prev, '+' | '-'))
}
