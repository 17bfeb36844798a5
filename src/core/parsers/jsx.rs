use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::syntax::{SyntaxTree, lower_module};

pub struct ParsedSource {
    pub module: Module,
    pub source: String,
    /// Offset of the file inside the shared `SourceMap`; spans are relative to it.
    pub start_pos: BytePos,
}

impl ParsedSource {
    /// Lower the swc AST into the arena tree the rules operate on.
    pub fn into_tree(self) -> SyntaxTree {
        lower_module(&self.module, self.source, self.start_pos)
    }
}

/// Pick the parser flavor from the file extension.
///
/// `.ts` files are parsed without TSX so that `<T>(x) => x` generics keep working.
fn syntax_for(file_path: &str) -> Syntax {
    match Path::new(file_path).extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        Some("js" | "jsx" | "mjs" | "cjs") => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    }
}

/// Parse JS/TS/JSX/TSX source code into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource {
            module,
            source: code,
            start_pos: source_file.start_pos,
        })
    })
}
