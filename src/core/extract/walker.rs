//! AST walker: finds `createMessage` call sites in modules that import the hook.

use swc_common::{SourceMap, Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ImportSpecifier, MemberProp, Module, ModuleDecl, ModuleExportName,
    ModuleItem,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::message::{ExtractedMessage, build_message};
use crate::core::hash::{ContentHasher, SnippetRenderer};
use crate::core::parsers::jsx::ParsedJSX;
use crate::core::{CallSiteError, SourceContext};

/// The import and method names that mark a localization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPattern {
    /// Module the hook is imported from.
    pub import_source: String,
    /// Named export that activates extraction.
    pub hook_name: String,
    /// Member method whose calls are extracted.
    pub trigger_method: String,
    /// Member method that replaces the trigger when call sites are rewritten.
    pub lookup_method: String,
}

impl Default for CallPattern {
    fn default() -> Self {
        Self {
            import_source: "fluent-react".to_string(),
            hook_name: "useLocalization".to_string(),
            trigger_method: "createMessage".to_string(),
            lookup_method: "getString".to_string(),
        }
    }
}

/// Whether a module is eligible for extraction.
///
/// A module becomes `Active` only when it imports the hook by name from the expected
/// source; otherwise it is left alone even if it calls a method with the trigger name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    Inactive,
    Active,
}

impl ExtractionState {
    pub fn from_imports(module: &Module, pattern: &CallPattern) -> Self {
        let imports_hook = module.body.iter().any(|item| {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                return false;
            };
            if import.type_only || import.src.value.as_str() != Some(pattern.import_source.as_str())
            {
                return false;
            }
            import.specifiers.iter().any(|specifier| match specifier {
                ImportSpecifier::Named(named) if !named.is_type_only => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                        Some(ModuleExportName::Str(s)) => s.value.to_string_lossy().to_string(),
                        None => named.local.sym.to_string(),
                    };
                    imported == pattern.hook_name
                }
                _ => false,
            })
        });

        if imports_hook {
            ExtractionState::Active
        } else {
            ExtractionState::Inactive
        }
    }
}

/// One recognized call site.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCall {
    /// The whole `x.createMessage(...)` call.
    pub span: Span,
    /// The `x` the method is called on.
    pub object: Span,
    pub context: SourceContext,
    pub extracted: ExtractedMessage,
}

/// Messages found in one module, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleExtraction {
    pub state: ExtractionState,
    pub calls: Vec<ExtractedCall>,
}

/// Extract every call site in a parsed module.
///
/// Stops at the first failing call: a module either yields all its messages or an error.
pub fn extract_module(
    parsed: &ParsedJSX,
    file_path: &str,
    pattern: &CallPattern,
) -> Result<ModuleExtraction, CallSiteError> {
    let state = ExtractionState::from_imports(&parsed.module, pattern);
    if state == ExtractionState::Inactive {
        return Ok(ModuleExtraction {
            state,
            calls: Vec::new(),
        });
    }

    let renderer = SnippetRenderer::new(&parsed.source_map);
    let mut extractor = ModuleExtractor {
        file_path,
        source_map: &parsed.source_map,
        hasher: ContentHasher::new(&renderer),
        pattern,
        calls: Vec::new(),
        error: None,
    };
    parsed.module.visit_with(&mut extractor);

    match extractor.error {
        Some(err) => Err(err),
        None => {
            tracing::debug!(
                file = file_path,
                messages = extractor.calls.len(),
                "extracted module"
            );
            Ok(ModuleExtraction {
                state,
                calls: extractor.calls,
            })
        }
    }
}

struct ModuleExtractor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    hasher: ContentHasher<'a>,
    pattern: &'a CallPattern,
    calls: Vec<ExtractedCall>,
    error: Option<CallSiteError>,
}

impl ModuleExtractor<'_> {
    /// Object span of `x.<trigger>(...)`, if `node` is a trigger call.
    fn trigger_object(&self, node: &CallExpr) -> Option<Span> {
        if let Callee::Expr(expr) = &node.callee
            && let Expr::Member(member) = &**expr
            && let MemberProp::Ident(prop) = &member.prop
            && prop.sym.as_str() == self.pattern.trigger_method
        {
            return Some(member.obj.span());
        }
        None
    }
}

impl Visit for ModuleExtractor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }

        if let Some(object) = self.trigger_object(node) {
            let context = SourceContext::from_span(self.file_path, self.source_map, node.span);
            match build_message(self.hasher, node) {
                Ok(extracted) => self.calls.push(ExtractedCall {
                    span: node.span,
                    object,
                    context,
                    extracted,
                }),
                Err(error) => {
                    self.error = Some(CallSiteError {
                        location: context.location,
                        source_line: context.source_line,
                        error,
                    });
                    return;
                }
            }
        }

        node.visit_children_with(self);
    }
}
