//! Selector/variant assembler.
//!
//! Builds a Fluent select expression from `createMessage(selector, variants, default?)`.
//! Validation order is fixed: selector, variants object, default key, then each variant
//! in source order. The first failure aborts, so a partially built expression is never
//! returned.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{Expr, ExprOrSpread, Lit, ObjectLit, Prop, PropName, PropOrSpread};

use super::expression::{ExpressionResolver, str_value, unparen};
use crate::core::ExtractionError;
use crate::core::fluent::{Identifier, SelectExpression, Variant, VariantKey, format_number};

/// Variant used when no explicit default is given.
pub const OTHER_VARIANT: &str = "other";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOutput {
    pub expression: SelectExpression,
    /// Source span of the default variant's value.
    pub fallback: Span,
}

/// Build a select expression from the arguments of a selector message call.
///
/// `args[0]` is the selector, `args[1]` the variants object, `args[2]` an optional
/// default variant key.
pub fn build_select_expression(
    resolver: &mut ExpressionResolver<'_>,
    args: &[ExprOrSpread],
) -> Result<SelectOutput, ExtractionError> {
    let selector = match args.first() {
        Some(arg) if arg.spread.is_none() => resolver.resolve_selector(&arg.expr)?,
        _ => return Err(ExtractionError::InvalidSelector),
    };

    let variants = variants_object(args.get(1))?;
    let default_key = default_variant_key(variants, args.get(2))?;

    let mut built = Vec::with_capacity(variants.props.len());
    let mut fallback = None;
    for prop in &variants.props {
        let (key, value) = variant_entry(resolver, prop)?;

        let pattern = resolver.resolve_text(value)?.ok_or_else(|| {
            ExtractionError::InvalidVariantValue {
                value: resolver.hasher().describe(&prop_span(prop)),
            }
        })?;

        // Only the first matching key is the default, even when keys repeat
        let default = fallback.is_none() && key.name() == default_key;
        if default {
            fallback = Some(value.span());
        }

        built.push(Variant {
            key,
            value: pattern,
            default,
        });
    }

    let Some(fallback) = fallback else {
        return Err(ExtractionError::UnknownDefaultVariant { key: default_key });
    };

    Ok(SelectOutput {
        expression: SelectExpression {
            selector,
            variants: built,
        },
        fallback,
    })
}

fn variants_object(arg: Option<&ExprOrSpread>) -> Result<&ObjectLit, ExtractionError> {
    let Some(arg) = arg else {
        return Err(ExtractionError::MissingVariants);
    };
    match unparen(&arg.expr) {
        Expr::Object(object) if arg.spread.is_none() => Ok(object),
        _ => Err(ExtractionError::InvalidVariantsType),
    }
}

/// Name of a variant key as it would be looked up at runtime: identifiers by name,
/// numeric keys stringified. Other key shapes have no name.
fn key_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Num(num) => Some(format_number(num.value)),
        _ => None,
    }
}

fn prop_key_name(prop: &PropOrSpread) -> Option<String> {
    match prop {
        PropOrSpread::Prop(prop) => match prop.as_ref() {
            Prop::KeyValue(kv) => key_name(&kv.key),
            Prop::Shorthand(ident) => Some(ident.sym.to_string()),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

fn default_variant_key(
    variants: &ObjectLit,
    explicit: Option<&ExprOrSpread>,
) -> Result<String, ExtractionError> {
    let has_key = |name: &str| {
        variants
            .props
            .iter()
            .any(|prop| prop_key_name(prop).as_deref() == Some(name))
    };

    match explicit {
        Some(arg) => {
            let key = match unparen(&arg.expr) {
                Expr::Lit(Lit::Str(s)) if arg.spread.is_none() => str_value(s),
                _ => return Err(ExtractionError::InvalidDefaultVariantType),
            };
            if has_key(&key) {
                Ok(key)
            } else {
                Err(ExtractionError::UnknownDefaultVariant { key })
            }
        }
        None if has_key(OTHER_VARIANT) => Ok(OTHER_VARIANT.to_string()),
        None => Err(ExtractionError::MissingDefaultVariant),
    }
}

/// Validate one variants property, returning its key and value expression.
fn variant_entry<'p>(
    resolver: &ExpressionResolver<'_>,
    prop: &'p PropOrSpread,
) -> Result<(VariantKey, &'p Expr), ExtractionError> {
    let describe = |span: Span| resolver.hasher().describe(&span);

    let kv = match prop {
        PropOrSpread::Prop(prop) => match prop.as_ref() {
            Prop::KeyValue(kv) => kv,
            _ => {
                return Err(ExtractionError::InvalidVariantValue {
                    value: describe(prop.span()),
                });
            }
        },
        PropOrSpread::Spread(spread) => {
            return Err(ExtractionError::InvalidVariantValue {
                value: describe(spread.span()),
            });
        }
    };

    if !matches!(unparen(&kv.value), Expr::Lit(Lit::Str(_)) | Expr::Tpl(_)) {
        return Err(ExtractionError::InvalidVariantValue {
            value: describe(kv.span()),
        });
    }

    let key = match &kv.key {
        PropName::Ident(ident) => VariantKey::Identifier(Identifier::new(ident.sym.to_string())?),
        PropName::Num(num) => VariantKey::Number(format_number(num.value)),
        other => {
            return Err(ExtractionError::InvalidVariantKey {
                key: describe(other.span()),
            });
        }
    };

    Ok((key, &kv.value))
}

fn prop_span(prop: &PropOrSpread) -> Span {
    match prop {
        PropOrSpread::Prop(prop) => prop.span(),
        PropOrSpread::Spread(spread) => spread.span(),
    }
}
