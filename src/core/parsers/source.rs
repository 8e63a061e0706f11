use std::{path::Path, sync::Arc};

use swc_common::{BytePos, FileName, Globals, GLOBALS, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::data::{SourceContext, SourceLocation};

/// A parsed source file together with the map needed to turn spans back into
/// byte offsets and line/column positions.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Arc<SourceFile>,
}

impl ParsedSource {
    /// Byte offset of `pos` in the original text.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos - self.source_file.start_pos).0 as usize
    }

    pub fn context(&self, file_path: &str, pos: BytePos) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(pos);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// `.ts` files cannot contain JSX, and enabling it there breaks `<T>x`
/// casts and generic arrow functions.
fn syntax_for(file_path: &str) -> Syntax {
    let tsx = !matches!(
        Path::new(file_path).extension().and_then(|e| e.to_str()),
        Some("ts" | "mts" | "cts")
    );
    Syntax::Typescript(TsSyntax {
        tsx,
        ..Default::default()
    })
}

/// Parse TS/TSX/JS/JSX source code into a module.
///
/// Each call uses its own `SourceMap` and swc globals, so files can be parsed
/// on several threads at once.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource, String> {
    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            format!("{} at {}:{}", e.kind().msg(), loc.line, loc.col_display + 1)
        })?;

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            source_file,
        })
    })
}
