//! Source text to expression tree.
//!
//! vSQL expressions use the expression syntax of UL4 templates: Python-like
//! operators, literals for dates (`@(2000-02-29)`) and colors (`#fff`), and
//! `{/}` for the empty set.
//!
//! ```
//! use vsql::syntax::{self, ExprKind};
//!
//! let expr = syntax::parse("p.name.upper()").unwrap();
//! assert!(matches!(expr.kind, ExprKind::Call { .. }));
//! ```

pub mod lexer;
pub mod parser;
pub mod tree;

pub use tree::{Arg, Expr, ExprKind, Literal, Span};

use thiserror::Error;

/// A lexer or parser error with its location in the source.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

/// Parse a vSQL expression.
///
/// Returns every error found; lexer errors stop before parsing.
pub fn parse(source: &str) -> Result<Expr, Vec<SyntaxError>> {
    use chumsky::error::Rich;
    use chumsky::input::Input;
    use chumsky::span::SimpleSpan;
    use chumsky::span::Span as _;
    use chumsky::Parser as _;

    // Step 1: Lexical analysis
    let tokens = lexer::lex(source).map_err(|errs| {
        errs.into_iter()
            .map(|e: Rich<'_, char>| SyntaxError {
                span: e.span().start()..e.span().end(),
                message: e.to_string(),
            })
            .collect::<Vec<_>>()
    })?;

    // Step 2: Parsing
    let len = source.len();
    let eoi: SimpleSpan = (len..len).into();
    let token_stream = tokens.as_slice().map(
        eoi,
        |(tok, span): &(lexer::Token<'_>, SimpleSpan)| (tok, span),
    );

    let result = parser::parser().parse(token_stream).into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| SyntaxError {
                span: e.span().start()..e.span().end(),
                message: e.to_string(),
            })
            .collect()
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let expr = parse("now() + years(3)").unwrap();
        assert_eq!(expr.span, 0..16);
    }

    #[test]
    fn test_parse_errors() {
        let errs = parse("1 +").unwrap_err();
        assert!(!errs.is_empty());
        assert_eq!(errs[0].span.start, 3);

        let errs = parse("'open").unwrap_err();
        assert!(!errs.is_empty());
    }
}
