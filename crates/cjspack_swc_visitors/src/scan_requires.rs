use std::fmt::Display;

use ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit};
use hashlink::LinkedHashSet;
use swc_core::{
  common::Span,
  ecma::{ast, visit as swc_ecma_visit},
};
use swc_ecma_visit::{noop_visit_type, Visit, VisitWith};

/// Collects the specifiers of every `require("...")` call in a script.
///
/// The walk is the generated swc visitor, which descends into every child position of
/// every node kind. Only calls whose callee is the plain identifier `require` and whose
/// single argument is a string literal count; no aliasing or constant folding is
/// attempted.
pub fn scan_requires(script: &ast::Script) -> ScanResult {
  let mut scanner = RequireScanner::default();
  script.visit_with(&mut scanner);
  scanner.result
}

#[derive(Debug, Default)]
pub struct ScanResult {
  /// Deduplicated, in order of first appearance.
  pub requires: LinkedHashSet<String>,
  /// One entry per `require` call that was skipped.
  pub ambiguous: Vec<AmbiguousRequire>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousRequire {
  pub span: Span,
  pub kind: AmbiguousRequireKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguousRequireKind {
  /// `require()`, `require("a", "b")`
  ArgumentCount(usize),
  /// `require(name)`, `require(...names)`, ``require(`a`)``
  NonLiteralArgument,
}

impl Display for AmbiguousRequireKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AmbiguousRequireKind::ArgumentCount(count) => {
        write!(f, "`require` called with {count} arguments")
      }
      AmbiguousRequireKind::NonLiteralArgument => {
        write!(f, "`require` called with a non-string argument")
      }
    }
  }
}

#[derive(Default)]
struct RequireScanner {
  result: ScanResult,
}

impl RequireScanner {
  fn bail(&mut self, span: Span, kind: AmbiguousRequireKind) {
    self.result.ambiguous.push(AmbiguousRequire { span, kind });
  }
}

fn is_require_callee(callee: &Callee) -> bool {
  matches!(callee, Callee::Expr(expr) if matches!(expr.as_ref(), Expr::Ident(ident) if &*ident.sym == "require"))
}

impl Visit for RequireScanner {
  noop_visit_type!();

  fn visit_call_expr(&mut self, node: &CallExpr) {
    if is_require_callee(&node.callee) {
      // Skipped calls are not descended into, so `require(require("a"), 1)` records nothing.
      match node.args.as_slice() {
        [ExprOrSpread { spread: None, expr }] => match expr.as_ref() {
          Expr::Lit(Lit::Str(specifier)) => {
            let requires = &mut self.result.requires;
            // Re-inserting would move the specifier to the back.
            if !requires.contains(&*specifier.value) {
              requires.insert(specifier.value.to_string());
            }
          }
          _ => return self.bail(node.span, AmbiguousRequireKind::NonLiteralArgument),
        },
        [_] => return self.bail(node.span, AmbiguousRequireKind::NonLiteralArgument),
        args => return self.bail(node.span, AmbiguousRequireKind::ArgumentCount(args.len())),
      }
    }
    node.visit_children_with(self);
  }
}

#[cfg(test)]
mod tests {
  use cjspack_common::CanonicalPath;
  use cjspack_compiler::Compiler;

  use super::*;

  fn scan(code: &str) -> ScanResult {
    let compiler = Compiler::default();
    let fm = compiler.create_source_file(&CanonicalPath::new("test.js"), code.to_string());
    let script = compiler.parse(&fm).unwrap();
    scan_requires(&script)
  }

  fn requires(code: &str) -> Vec<String> {
    scan(code).requires.into_iter().collect()
  }

  #[test]
  fn bare_call() {
    assert_eq!(requires(r#"require("cool-mans")"#), vec!["cool-mans"]);
  }

  #[test]
  fn variable_initializer() {
    assert_eq!(requires("var time = require('wristwatch')"), vec!["wristwatch"]);
  }

  #[test]
  fn assignment() {
    assert_eq!(
      requires("module.exports = require('cool.thing.dude');"),
      vec!["cool.thing.dude"]
    );
  }

  #[test]
  fn try_catch() {
    let found = requires(
      r#"
        var lib;
        try {
          lib = require('primary');
        } catch(e) {
          lib = require('secondary');
        }
      "#,
    );
    assert_eq!(found, vec!["primary", "secondary"]);
  }

  #[test]
  fn object_literal_value() {
    let found = requires(
      r#"
        var coolThings = {
          "a": require('pants')()
        };
      "#,
    );
    assert_eq!(found, vec!["pants"]);
  }

  #[test]
  fn nested_in_functions_and_arguments() {
    let found = requires(
      r#"
        function load() { return wrap(require('./a'), [require("./b")]); }
        const lazy = () => cond ? require('./c') : require('./a');
        class K { m() { return require('./d'); } }
      "#,
    );
    assert_eq!(found, vec!["./a", "./b", "./c", "./d"]);
  }

  #[test]
  fn duplicates_are_collapsed() {
    let result = scan("require('x'); require('y'); require('x');");
    assert_eq!(result.requires.len(), 2);
    assert!(result.ambiguous.is_empty());
  }

  #[test]
  fn duplicates_keep_first_position() {
    assert_eq!(
      requires("require('a'); require('b'); require('a'); require('c'); require('b');"),
      vec!["a", "b", "c"]
    );
  }

  #[test]
  fn too_many_arguments() {
    let result = scan(r#"require("x", "y"); require("z");"#);
    assert_eq!(result.requires.into_iter().collect::<Vec<_>>(), vec!["z"]);
    assert_eq!(result.ambiguous.len(), 1);
    assert_eq!(
      result.ambiguous[0].kind,
      AmbiguousRequireKind::ArgumentCount(2)
    );
  }

  #[test]
  fn non_literal_argument() {
    let result = scan("var name = 'x'; require(name); require(`y`); require(...names);");
    assert!(result.requires.is_empty());
    assert_eq!(result.ambiguous.len(), 3);
    assert!(result
      .ambiguous
      .iter()
      .all(|a| a.kind == AmbiguousRequireKind::NonLiteralArgument));
  }

  #[test]
  fn skipped_calls_are_not_descended() {
    let result = scan(r#"require(require("inner"), 1); require(lookup(require("also")));"#);
    assert!(result.requires.is_empty());
    assert_eq!(result.ambiguous.len(), 2);
  }

  #[test]
  fn other_callees_are_ignored() {
    let result = scan(r#"foo.require("a"); requireAll("b"); obj["require"]("c");"#);
    assert!(result.requires.is_empty());
    assert!(result.ambiguous.is_empty());
  }
}
