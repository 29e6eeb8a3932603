use anyhow::{Result, anyhow};
use std::sync::Arc;
use swc_common::{BytePos, FileName, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// Original file contents, for splicing rewrites.
    pub source: Arc<str>,
    /// Position of the file's first byte inside `source_map`.
    pub start_pos: BytePos,
    /// Length of a byte order mark at the start of `source`. The `SourceMap` copy of
    /// the file does not have it.
    pub bom_len: usize,
}

impl ParsedJSX {
    /// Byte range of `span` within [`ParsedJSX::source`].
    pub fn byte_range(&self, span: Span) -> std::ops::Range<usize> {
        let lo = (span.lo.0 - self.start_pos.0) as usize + self.bom_len;
        let hi = (span.hi.0 - self.start_pos.0) as usize + self.bom_len;
        lo..hi
    }
}

/// Parse JSX/TSX source code string into an AST.
///
/// Accepts a per-file SourceMap so files can be parsed in parallel.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJSX> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source: Arc<str> = Arc::from(code.as_str());
        let bom_len = if code.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "Failed to parse {}:{}:{}: {}",
                file_path,
                loc.line,
                loc.col_display + 1,
                e.kind().msg()
            )
        })?;

        Ok(ParsedJSX {
            module,
            source,
            start_pos: source_file.start_pos,
            bom_len,
            source_map,
        })
    })
}
