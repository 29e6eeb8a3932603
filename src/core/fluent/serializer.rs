//! Resource emitter: renders a [`Resource`] as Fluent syntax.
//!
//! The layout matches the reference Fluent serializer, so emitted files diff cleanly
//! against hand-edited ones:
//!
//! ```text
//! message-0a1b2c3d4e = Hello { $expression-5f6a7b8c9d }
//! message-1b2c3d4e5f =
//!     { $status ->
//!         [ok] Fine
//!        *[other] Unknown
//!     }
//! ```
//!
//! Text that Fluent would otherwise interpret or trim (braces, `[`, `*` or `.` at the
//! start of a line, blanks at the edges of a line or value) is emitted as a
//! string-literal placeable.

use super::ast::{
    CallArguments, Expression, FunctionReference, InlineExpression, Literal, Message, Pattern,
    PatternElement, Resource, SelectExpression, Selector, Variant, VariantKey,
};

const INDENT: &str = "    ";

/// Serialize a resource. Pure: the same resource always yields the same text.
pub fn serialize(resource: &Resource) -> String {
    resource.body.iter().map(serialize_message).collect()
}

pub fn serialize_message(message: &Message) -> String {
    format!("{} ={}\n", message.id, serialize_value(&message.value))
}

fn serialize_value(pattern: &Pattern) -> String {
    let content = indent_except_first_line(&serialize_pattern(pattern));
    if starts_on_new_line(pattern) {
        format!("\n{}{}", INDENT, content)
    } else {
        format!(" {}", content)
    }
}

fn starts_on_new_line(pattern: &Pattern) -> bool {
    pattern.elements.iter().any(|element| match element {
        PatternElement::Placeable(Expression::Select(_)) => true,
        PatternElement::Text(text) => text.contains('\n'),
        PatternElement::Placeable(Expression::Inline(_)) => false,
    })
}

fn serialize_pattern(pattern: &Pattern) -> String {
    if pattern.elements.iter().all(|element| match element {
        PatternElement::Text(text) => text.is_empty(),
        PatternElement::Placeable(_) => false,
    }) {
        // Fluent has no empty values
        return literal_placeable("");
    }

    let is_content = |element: &PatternElement| match element {
        PatternElement::Text(text) => !text.is_empty(),
        PatternElement::Placeable(_) => true,
    };
    let first = pattern.elements.iter().position(is_content);
    let last = pattern.elements.iter().rposition(is_content);

    let mut out = String::new();
    let mut at_line_start = true;
    for (index, element) in pattern.elements.iter().enumerate() {
        match element {
            PatternElement::Text(text) => {
                let mut body = text.as_str();
                // Fluent drops blank lines before and blanks after a value
                if Some(index) == first {
                    let rest = body.trim_start_matches('\n');
                    if rest.len() < body.len() {
                        out.push_str(&literal_placeable(&body[..body.len() - rest.len()]));
                        at_line_start = false;
                        body = rest;
                    }
                }
                let mut tail = "";
                if Some(index) == last {
                    let kept = body.trim_end_matches([' ', '\n']);
                    tail = &body[kept.len()..];
                    body = kept;
                }

                escape_text(body, at_line_start, &mut out);
                if !body.is_empty() {
                    at_line_start = body.ends_with('\n');
                }
                if !tail.is_empty() {
                    out.push_str(&literal_placeable(tail));
                    at_line_start = false;
                }
            }
            PatternElement::Placeable(expression) => {
                out.push_str(&serialize_placeable(expression));
                at_line_start = false;
            }
        }
    }
    out
}

fn serialize_placeable(expression: &Expression) -> String {
    match expression {
        Expression::Select(select) => format!("{{ {}}}", serialize_select(select)),
        Expression::Inline(inline) => format!("{{ {} }}", serialize_inline(inline)),
    }
}

fn serialize_select(select: &SelectExpression) -> String {
    let mut out = format!("{} ->", serialize_selector(&select.selector));
    for variant in &select.variants {
        out.push_str(&serialize_variant(variant));
    }
    out.push('\n');
    out
}

fn serialize_selector(selector: &Selector) -> String {
    match selector {
        Selector::Variable(id) => format!("${}", id),
        Selector::Function(function) => serialize_function(function),
    }
}

fn serialize_variant(variant: &Variant) -> String {
    let key = match &variant.key {
        VariantKey::Identifier(id) => id.as_str(),
        VariantKey::Number(value) => value.as_str(),
    };
    let value = indent_except_first_line(&serialize_pattern(&variant.value));
    if variant.default {
        format!("\n   *[{}] {}", key, value)
    } else {
        format!("\n    [{}] {}", key, value)
    }
}

fn serialize_inline(expression: &InlineExpression) -> String {
    match expression {
        InlineExpression::Literal(literal) => serialize_literal(literal),
        InlineExpression::VariableReference(id) => format!("${}", id),
        InlineExpression::FunctionReference(function) => serialize_function(function),
    }
}

fn serialize_function(function: &FunctionReference) -> String {
    format!("{}{}", function.id, serialize_call_arguments(&function.arguments))
}

fn serialize_call_arguments(arguments: &CallArguments) -> String {
    let parts: Vec<String> = arguments
        .positional
        .iter()
        .map(serialize_inline)
        .chain(
            arguments
                .named
                .iter()
                .map(|arg| format!("{}: {}", arg.name, serialize_literal(&arg.value))),
        )
        .collect();
    format!("({})", parts.join(", "))
}

fn serialize_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(value) => format!("\"{}\"", escape_string_literal(value)),
        Literal::Number(value) => value.clone(),
    }
}

fn escape_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn literal_placeable(value: &str) -> String {
    format!("{{ \"{}\" }}", escape_string_literal(value))
}

fn escape_text(text: &str, mut at_line_start: bool, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if at_line_start && c == ' ' {
            let mut blanks = String::from(c);
            while chars.peek() == Some(&' ') {
                blanks.push(' ');
                chars.next();
            }
            out.push_str(&literal_placeable(&blanks));
            at_line_start = false;
            continue;
        }
        if at_line_start && matches!(c, '[' | '*' | '.') {
            out.push_str(&literal_placeable(&c.to_string()));
            at_line_start = false;
            continue;
        }

        match c {
            '{' | '}' => out.push_str(&literal_placeable(&c.to_string())),
            _ => out.push(c),
        }
        at_line_start = c == '\n';
    }
}

fn indent_except_first_line(content: &str) -> String {
    content.replace('\n', &format!("\n{}", INDENT))
}
