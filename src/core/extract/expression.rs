//! Expression resolver: maps JavaScript expressions onto Fluent values.
//!
//! Every variable the produced Fluent references is recorded as a [`Binding`], so the
//! call site can later be rewritten to pass the matching runtime arguments.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{Expr, Lit, NewExpr, Prop, PropName, PropOrSpread, Str, Tpl};

use crate::core::ExtractionError;
use crate::core::fluent::{
    CallArguments, FunctionReference, Identifier, InlineExpression, Literal, NamedArgument,
    Pattern, PatternElement, Selector, format_number,
};
use crate::core::hash::{ContentHasher, IdPrefix};

/// Constructor classes with a Fluent builtin counterpart.
const BUILTINS: &[(&str, &str)] = &[("FluentNumber", "NUMBER"), ("FluentDateTime", "DATETIME")];

/// A Fluent variable and the source expression that supplies its value at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: Identifier,
    pub value: Span,
    /// The value is a plain identifier with the same name as the variable.
    pub shorthand: bool,
}

pub struct ExpressionResolver<'a> {
    hasher: ContentHasher<'a>,
    bindings: Vec<Binding>,
}

impl<'a> ExpressionResolver<'a> {
    pub fn new(hasher: ContentHasher<'a>) -> Self {
        Self {
            hasher,
            bindings: Vec::new(),
        }
    }

    pub fn hasher(&self) -> ContentHasher<'a> {
        self.hasher
    }

    /// Bindings recorded so far, in first-reference order.
    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    /// Resolve a string or template literal into a pattern.
    ///
    /// Returns `Ok(None)` when `expr` is neither.
    pub fn resolve_text(&mut self, expr: &Expr) -> Result<Option<Pattern>, ExtractionError> {
        match unparen(expr) {
            Expr::Lit(Lit::Str(s)) => Ok(Some(Pattern::new(vec![PatternElement::text(
                str_value(s),
            )]))),
            Expr::Tpl(tpl) => self.resolve_template(tpl).map(Some),
            _ => Ok(None),
        }
    }

    fn resolve_template(&mut self, tpl: &Tpl) -> Result<Pattern, ExtractionError> {
        let mut elements = Vec::with_capacity(tpl.quasis.len() + tpl.exprs.len());
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            let text = quasi.raw.to_string();
            if !text.is_empty() {
                elements.push(PatternElement::text(text));
            }
            if let Some(expr) = tpl.exprs.get(i) {
                elements.push(PatternElement::inline(self.resolve_embedded(expr)?));
            }
        }
        Ok(Pattern::new(elements))
    }

    /// Resolve an interpolated `${...}` expression.
    ///
    /// Builtin constructor calls become function references; anything else is bound to a
    /// fresh `expression-<hash>` variable.
    pub fn resolve_embedded(&mut self, expr: &Expr) -> Result<InlineExpression, ExtractionError> {
        if let Expr::New(new) = unparen(expr) {
            return self
                .resolve_builtin(new)
                .map(InlineExpression::FunctionReference);
        }

        let name = self.hasher.identifier(expr, IdPrefix::Expression)?;
        self.bind(name.clone(), expr.span(), false);
        Ok(InlineExpression::VariableReference(name))
    }

    /// Resolve the value a select expression branches on.
    pub fn resolve_selector(&mut self, expr: &Expr) -> Result<Selector, ExtractionError> {
        match unparen(expr) {
            Expr::Ident(ident) => {
                let name = Identifier::new(ident.sym.to_string())?;
                self.bind(name.clone(), ident.span, true);
                Ok(Selector::Variable(name))
            }
            Expr::New(new) => self.resolve_builtin(new).map(Selector::Function),
            _ => Err(ExtractionError::InvalidSelector),
        }
    }

    /// Map `new FluentNumber(value, { ...options })` to `NUMBER($selector-<hash>, ...)`.
    pub fn resolve_builtin(&mut self, new: &NewExpr) -> Result<FunctionReference, ExtractionError> {
        let class_name = match new.callee.as_ref() {
            Expr::Ident(ident) => ident.sym.to_string(),
            callee => self.hasher.describe(callee),
        };
        let Some((_, function)) = BUILTINS.iter().find(|(class, _)| *class == class_name) else {
            return Err(ExtractionError::UnknownBuiltin { name: class_name });
        };

        let variable = self.hasher.identifier(new, IdPrefix::Selector)?;
        self.bind(variable.clone(), new.span, false);

        let named = match new.args.as_deref().and_then(|args| args.get(1)) {
            Some(options) if options.spread.is_none() => self.resolve_options(&options.expr)?,
            Some(options) => {
                return Err(ExtractionError::InvalidFormatterOptions {
                    code: self.hasher.describe(&options.expr),
                });
            }
            None => Vec::new(),
        };

        Ok(FunctionReference {
            id: Identifier::new(*function)?,
            arguments: CallArguments {
                positional: vec![InlineExpression::VariableReference(variable)],
                named,
            },
        })
    }

    fn resolve_options(&self, expr: &Expr) -> Result<Vec<NamedArgument>, ExtractionError> {
        let Expr::Object(object) = unparen(expr) else {
            return Err(ExtractionError::InvalidFormatterOptions {
                code: self.hasher.describe(expr),
            });
        };

        object
            .props
            .iter()
            .map(|prop| match prop {
                PropOrSpread::Prop(prop) => match prop.as_ref() {
                    Prop::KeyValue(kv) => Ok(NamedArgument {
                        name: self.option_name(&kv.key)?,
                        value: self.resolve_literal(&kv.value)?,
                    }),
                    other => Err(ExtractionError::InvalidVariantValue {
                        value: self.hasher.describe(other),
                    }),
                },
                PropOrSpread::Spread(spread) => Err(ExtractionError::InvalidVariantValue {
                    value: self.hasher.describe(spread),
                }),
            })
            .collect()
    }

    fn option_name(&self, key: &PropName) -> Result<Identifier, ExtractionError> {
        match key {
            PropName::Ident(ident) => Identifier::new(ident.sym.to_string()),
            PropName::Str(s) => Identifier::new(str_value(s)),
            other => Err(ExtractionError::InvalidVariantKey {
                key: self.hasher.describe(other),
            }),
        }
    }

    /// A string or number literal, as used for formatter options.
    pub fn resolve_literal(&self, expr: &Expr) -> Result<Literal, ExtractionError> {
        match unparen(expr) {
            Expr::Lit(Lit::Str(s)) => Ok(Literal::String(str_value(s))),
            Expr::Lit(Lit::Num(n)) => Ok(Literal::Number(format_number(n.value))),
            _ => Err(ExtractionError::InvalidVariantValue {
                value: self.hasher.describe(expr),
            }),
        }
    }

    fn bind(&mut self, name: Identifier, value: Span, shorthand: bool) {
        if self.bindings.iter().any(|binding| binding.name == name) {
            return;
        }
        self.bindings.push(Binding {
            name,
            value,
            shorthand,
        });
    }
}

/// Strip any number of enclosing parentheses.
pub fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        _ => expr,
    }
}

pub fn str_value(s: &Str) -> String {
    s.value.to_string_lossy().to_string()
}
