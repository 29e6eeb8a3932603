//! Call-site rewriting: `x.createMessage(...)` becomes `x.getString(id, args, fallback)`.
//!
//! The rewritten call looks up the extracted message by id, passes every variable the
//! message references, and falls back to the original source text when the bundle has
//! no translation.

use std::ops::Range;

use crate::core::extract::{Binding, ExtractedCall, ModuleExtraction};
use crate::core::parsers::jsx::ParsedJSX;
use crate::core::{SourceContext, SourceLocation};

/// One call site and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRewrite {
    pub context: SourceContext,
    /// Byte range of the call in the module source.
    pub range: Range<usize>,
    pub original: String,
    pub replacement: String,
}

/// A call left unchanged because it sits inside another rewritten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedCall {
    pub context: SourceContext,
    pub outer: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRewrite {
    pub rewrites: Vec<CallRewrite>,
    pub nested: Vec<NestedCall>,
}

impl ModuleRewrite {
    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }

    /// Apply every rewrite to `source`.
    pub fn apply(&self, source: &str) -> String {
        let mut output = source.to_string();
        let mut ordered: Vec<&CallRewrite> = self.rewrites.iter().collect();
        ordered.sort_by_key(|rewrite| std::cmp::Reverse(rewrite.range.start));
        for rewrite in ordered {
            output.replace_range(rewrite.range.clone(), &rewrite.replacement);
        }
        output
    }
}

/// Plan the rewrites for an extracted module.
///
/// Calls arrive in source pre-order, so an enclosing call is always seen before the
/// calls in its arguments.
pub fn rewrite_module(
    parsed: &ParsedJSX,
    extraction: &ModuleExtraction,
    lookup_method: &str,
) -> ModuleRewrite {
    let mut rewrites: Vec<CallRewrite> = Vec::new();
    let mut nested = Vec::new();

    for call in &extraction.calls {
        let range = parsed.byte_range(call.span);
        let outer = rewrites
            .iter()
            .find(|rewrite| rewrite.range.start <= range.start && range.end <= rewrite.range.end);
        if let Some(outer) = outer {
            nested.push(NestedCall {
                context: call.context.clone(),
                outer: outer.context.location.clone(),
            });
            continue;
        }

        rewrites.push(CallRewrite {
            context: call.context.clone(),
            original: parsed.source[range.clone()].to_string(),
            replacement: lookup_call(parsed, call, lookup_method),
            range,
        });
    }

    tracing::debug!(
        rewrites = rewrites.len(),
        nested = nested.len(),
        "planned module rewrite"
    );
    ModuleRewrite { rewrites, nested }
}

fn lookup_call(parsed: &ParsedJSX, call: &ExtractedCall, lookup_method: &str) -> String {
    let snippet = |span| &parsed.source[parsed.byte_range(span)];
    format!(
        "{}.{}(\"{}\", {}, {})",
        snippet(call.object),
        lookup_method,
        call.extracted.message.id,
        runtime_arguments(parsed, &call.extracted.bindings),
        snippet(call.extracted.fallback),
    )
}

fn runtime_arguments(parsed: &ParsedJSX, bindings: &[Binding]) -> String {
    if bindings.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = bindings
        .iter()
        .map(|binding| {
            if binding.shorthand {
                binding.name.to_string()
            } else {
                format!(
                    "\"{}\": {}",
                    binding.name,
                    &parsed.source[parsed.byte_range(binding.value)]
                )
            }
        })
        .collect();
    format!("{{ {} }}", entries.join(", "))
}
