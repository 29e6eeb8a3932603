//! Message builder: one Fluent message per `createMessage(...)` call.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{CallExpr, Expr, Lit};

use super::expression::{Binding, ExpressionResolver, unparen};
use super::select::build_select_expression;
use crate::core::ExtractionError;
use crate::core::fluent::{Expression, Message, Pattern, PatternElement};
use crate::core::hash::{ContentHasher, IdPrefix};

/// A message together with what a call-site rewrite needs to reproduce it at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMessage {
    pub message: Message,
    /// Variables referenced by the message and the expressions that supply them.
    pub bindings: Vec<Binding>,
    /// Source text to show when the message is missing from the bundle.
    pub fallback: Span,
}

/// Build the message for a recognized call expression.
pub fn build_message(
    hasher: ContentHasher<'_>,
    call: &CallExpr,
) -> Result<ExtractedMessage, ExtractionError> {
    let unsupported = || ExtractionError::UnsupportedMessageShape {
        code: hasher.describe(call),
    };

    let first = match call.args.first() {
        Some(arg) if arg.spread.is_none() => unparen(&arg.expr),
        _ => return Err(unsupported()),
    };

    let mut resolver = ExpressionResolver::new(hasher);
    match first {
        Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => {
            let id = hasher.identifier(first, IdPrefix::Message)?;
            let value = resolver.resolve_text(first)?.ok_or_else(unsupported)?;
            Ok(ExtractedMessage {
                message: Message { id, value },
                bindings: resolver.into_bindings(),
                fallback: first.span(),
            })
        }
        Expr::Ident(_) | Expr::New(_) => {
            let id = hasher.identifier(first, IdPrefix::Message)?;
            let select = build_select_expression(&mut resolver, &call.args)?;
            Ok(ExtractedMessage {
                message: Message {
                    id,
                    value: Pattern::new(vec![PatternElement::Placeable(Expression::Select(
                        select.expression,
                    ))]),
                },
                bindings: resolver.into_bindings(),
                fallback: select.fallback,
            })
        }
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_common::SourceMapper;

    use super::*;
    use crate::core::extract::test_utils::{first_call, parse};
    use crate::core::fluent::{Identifier, InlineExpression, Selector};
    use crate::core::hash::{SnippetRenderer, canonicalize, digest};

    fn build(code: &str) -> Result<ExtractedMessage, ExtractionError> {
        let parsed = parse(code);
        let renderer = SnippetRenderer::new(&parsed.source_map);
        build_message(ContentHasher::new(&renderer), first_call(&parsed))
    }

    fn prefixed(prefix: &str, code: &str) -> Identifier {
        Identifier::new(format!("{}-{}", prefix, digest(&canonicalize(code)))).unwrap()
    }

    #[test]
    fn test_string_literal_message() {
        let extracted = build("l10n.createMessage(\"Hello world\");").unwrap();
        assert_eq!(
            extracted.message,
            Message {
                id: prefixed("message", "\"Hello world\""),
                value: Pattern::new(vec![PatternElement::text("Hello world")]),
            }
        );
        assert!(extracted.bindings.is_empty());
    }

    #[test]
    fn test_template_message() {
        let extracted = build("l10n.createMessage(`Hello ${name}`);").unwrap();
        assert_eq!(
            extracted.message,
            Message {
                id: prefixed("message", "`Hello ${name}`"),
                value: Pattern::new(vec![
                    PatternElement::text("Hello "),
                    PatternElement::inline(InlineExpression::VariableReference(prefixed(
                        "expression",
                        "name"
                    ))),
                ]),
            }
        );
        assert_eq!(extracted.bindings.len(), 1);
    }

    #[test]
    fn test_id_ignores_formatting() {
        let compact = build("l10n.createMessage(`Hi ${user.name}`);").unwrap();
        let spaced = build("l10n.createMessage(\n    `Hi ${ user . name }`\n);").unwrap();
        assert_eq!(compact.message, spaced.message);
    }

    #[test]
    fn test_selector_message() {
        let extracted =
            build("l10n.createMessage(status, { ok: \"Fine\", other: \"Unknown\" });").unwrap();

        assert_eq!(extracted.message.id, prefixed("message", "status"));
        assert_eq!(extracted.message.value.elements.len(), 1);
        match &extracted.message.value.elements[0] {
            PatternElement::Placeable(Expression::Select(select)) => {
                assert_eq!(
                    select.selector,
                    Selector::Variable(Identifier::new("status").unwrap())
                );
                assert_eq!(select.variants.len(), 2);
            }
            other => panic!("unexpected element: {:?}", other),
        }
    }

    #[test]
    fn test_fallback_spans() {
        let code = "l10n.createMessage(status, { ok: \"Fine\", other: \"Unknown\" });";
        let parsed = parse(code);
        let renderer = SnippetRenderer::new(&parsed.source_map);
        let extracted =
            build_message(ContentHasher::new(&renderer), first_call(&parsed)).unwrap();
        assert_eq!(
            parsed.source_map.span_to_snippet(extracted.fallback).unwrap(),
            "\"Unknown\""
        );

        let code = "l10n.createMessage('Plain');";
        let parsed = parse(code);
        let renderer = SnippetRenderer::new(&parsed.source_map);
        let extracted =
            build_message(ContentHasher::new(&renderer), first_call(&parsed)).unwrap();
        assert_eq!(
            parsed.source_map.span_to_snippet(extracted.fallback).unwrap(),
            "'Plain'"
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(
            build("l10n.createMessage(42);"),
            Err(ExtractionError::UnsupportedMessageShape {
                code: "l10n.createMessage(42)".to_string()
            })
        );
        assert_eq!(
            build("l10n.createMessage();"),
            Err(ExtractionError::UnsupportedMessageShape {
                code: "l10n.createMessage()".to_string()
            })
        );
        assert_eq!(
            build("l10n.createMessage(...parts);"),
            Err(ExtractionError::UnsupportedMessageShape {
                code: "l10n.createMessage(...parts)".to_string()
            })
        );
    }

    #[test]
    fn test_selector_errors_propagate() {
        assert_eq!(
            build("l10n.createMessage(status, { ok: \"Fine\" }, 123);"),
            Err(ExtractionError::InvalidDefaultVariantType)
        );
        assert_eq!(
            build("l10n.createMessage(new FluentRelativeTime(t), { other: \"x\" });"),
            Err(ExtractionError::UnknownBuiltin {
                name: "FluentRelativeTime".to_string()
            })
        );
    }
}
