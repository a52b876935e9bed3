use ast::EsVersion;
use cjspack_common::CanonicalPath;
use swc_core::{
  common::{sync::Lrc, FileName, SourceFile, SourceMap, Span, Spanned},
  ecma::{
    ast,
    parser::{self as swc_ecma_parser, PResult},
  },
};
use swc_ecma_parser::{lexer::Lexer, EsConfig, Parser, StringInput, Syntax};

/// Owns the source map of one build. Every parsed module is registered in it, so spans
/// coming out of [`Compiler::parse`] can be mapped back to lines.
#[derive(Default)]
pub struct Compiler {
  pub cm: Lrc<SourceMap>,
}

impl Compiler {
  pub fn create_source_file(&self, path: &CanonicalPath, code: String) -> Lrc<SourceFile> {
    self
      .cm
      .new_source_file(FileName::Custom(path.to_string()), code)
  }

  /// Parses a CommonJS module.
  ///
  /// Modules run inside a function wrapper, so a top-level `return` is accepted. Errors the
  /// parser recovered from still fail the parse; the first one in the source is returned.
  pub fn parse(&self, source_file: &SourceFile) -> PResult<ast::Script> {
    let lexer = Lexer::new(
      syntax(),
      EsVersion::latest(),
      StringInput::from(source_file),
      None,
    );
    let mut parser = Parser::new_from(lexer);
    let script = parser.parse_script();
    let mut recovered = parser.take_errors();
    recovered.sort_by_key(|e| e.span().lo);
    match (script, recovered.into_iter().next()) {
      (Ok(_), Some(first)) => Err(first),
      (script, _) => script,
    }
  }

  /// 1-based line of the start of `span`.
  pub fn line_of(&self, span: Span) -> usize {
    self.cm.lookup_char_pos(span.lo).line
  }

  /// 1-based line a parse error points at.
  pub fn line_of_error(&self, err: &swc_ecma_parser::error::Error) -> usize {
    self.line_of(err.span())
  }
}

fn syntax() -> Syntax {
  Syntax::Es(EsConfig {
    allow_return_outside_function: true,
    ..Default::default()
  })
}
