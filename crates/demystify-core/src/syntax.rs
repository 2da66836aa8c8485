//! Parser/printer boundary.
//!
//! Source text goes through swc in both directions. Every pass in this crate
//! works on the [`Ast`] produced here and hands it back to [`print`], whose
//! canonical output is what the text-level miner scans.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use swc_common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax};

/// Grammar version every round is parsed with.
const TARGET: EsVersion = EsVersion::Es2020;

/// Grammar goal for parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Classic script: no `import`/`export`, sloppy mode allowed.
    #[default]
    Script,
    /// ES module.
    Module,
}

/// A parsed program together with the source map its spans point into.
pub struct Ast {
    pub program: Program,
    cm: Lrc<SourceMap>,
}

impl std::fmt::Debug for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ast").field("program", &self.program).finish()
    }
}

/// Parse source text.
///
/// Errors the parser recovers from are still treated as fatal: a round that
/// renames on top of a partially understood tree would print garbage.
pub fn parse(source: &str, kind: SourceKind) -> Result<Ast, Error> {
    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom("input.js".to_string())),
        source.to_string(),
    );

    let syntax = Syntax::Es(EsSyntax::default());
    let lexer = Lexer::new(syntax, TARGET, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let parsed = match kind {
        SourceKind::Script => parser.parse_script().map(Program::Script),
        SourceKind::Module => parser.parse_module().map(Program::Module),
    };
    let program = parsed.map_err(|e| parse_error(&cm, &e))?;

    if let Some(e) = parser.take_errors().into_iter().next() {
        return Err(parse_error(&cm, &e));
    }

    Ok(Ast { program, cm })
}

fn parse_error(cm: &SourceMap, err: &swc_ecma_parser::error::Error) -> Error {
    let span = err.span();
    let message = err.kind().msg().into_owned();
    if span.is_dummy() {
        return Error::parse(0, 0, message);
    }
    let loc = cm.lookup_char_pos(span.lo);
    Error::parse(loc.line, loc.col_display, message)
}

/// Print a program as canonical, non-minified source.
pub fn print(ast: &Ast) -> Result<String, Error> {
    let mut buf = Vec::new();

    {
        let writer = JsWriter::new(ast.cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_minify(false)
                .with_target(TARGET),
            cm: ast.cm.clone(),
            comments: None,
            wr: writer,
        };

        match &ast.program {
            Program::Script(script) => emitter.emit_script(script),
            Program::Module(module) => emitter.emit_module(module),
        }
        .map_err(|e| Error::print(format!("Failed to emit: {e}")))?;
    }

    String::from_utf8(buf).map_err(|e| Error::print(format!("Invalid UTF-8 output: {e}")))
}

/// Parse then print. Used to normalise input and in round-trip checks.
pub fn reformat(source: &str, kind: SourceKind) -> Result<String, Error> {
    print(&parse(source, kind)?)
}
