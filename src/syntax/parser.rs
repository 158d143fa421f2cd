//! Parser for vSQL expressions using chumsky.
//!
//! Transforms the token stream from the lexer into an [`Expr`] tree. Binding
//! strength, loosest first: `if`/`else`, `or`, `and`, `not`, comparisons
//! (`== != < <= > >= in not in is is not`), `|`, `^`, `&`, shifts, `+ -`,
//! `* / // %`, unary `- ~`, then attribute access, calls and subscripts.

use chrono::{NaiveDate, NaiveDateTime};
use chumsky::input::ValueInput;
use chumsky::prelude::*;

use super::lexer::Token;
use super::tree::{Arg, Expr, ExprKind, Literal, Span};
use crate::ast::{BinaryOp, UnaryOp};
use crate::error::ErrorKind;
use crate::types::Color;

/// Convert a SimpleSpan to our Span type (Range<usize>)
fn to_span(span: SimpleSpan) -> Span {
    span.start..span.end
}

// ============================================================================
// Literals
// ============================================================================

fn int_literal(text: &str) -> Literal {
    let lower = text.to_ascii_lowercase();
    let parsed = if let Some(digits) = lower.strip_prefix("0x") {
        i64::from_str_radix(digits, 16)
    } else if let Some(digits) = lower.strip_prefix("0o") {
        i64::from_str_radix(digits, 8)
    } else if let Some(digits) = lower.strip_prefix("0b") {
        i64::from_str_radix(digits, 2)
    } else {
        lower.parse()
    };
    parsed.map_or(Literal::Malformed(ErrorKind::ConstInt), Literal::Int)
}

fn float_literal(text: &str) -> Literal {
    text.parse()
        .map_or(Literal::Malformed(ErrorKind::ConstNumber), Literal::Float)
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

fn date_literal(text: &str) -> Literal {
    if text.contains('T') {
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map_or(Literal::Malformed(ErrorKind::ConstDateTime), Literal::DateTime)
    } else {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_or(Literal::Malformed(ErrorKind::ConstDate), Literal::Date)
    }
}

fn color_literal(text: &str) -> Literal {
    let hex = text.trim_start_matches('#');
    let Some(digits) = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
    else {
        return Literal::Malformed(ErrorKind::ConstColor);
    };
    let short = |d: u8| d * 17;
    let long = |hi: u8, lo: u8| hi * 16 + lo;
    let color = match digits.as_slice() {
        [r, g, b] => Color::new(short(*r), short(*g), short(*b), 0xff),
        [r, g, b, a] => Color::new(short(*r), short(*g), short(*b), short(*a)),
        [r1, r2, g1, g2, b1, b2] => Color::new(long(*r1, *r2), long(*g1, *g2), long(*b1, *b2), 0xff),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Color::new(
            long(*r1, *r2),
            long(*g1, *g2),
            long(*b1, *b2),
            long(*a1, *a2),
        ),
        _ => return Literal::Malformed(ErrorKind::ConstColor),
    };
    Literal::Color(color)
}

// ============================================================================
// Tree building
// ============================================================================

/// What can follow an operand: `.name`, `(args)`, `[index]`, `[i1:i2]`.
#[derive(Debug, Clone)]
enum Postfix {
    Attr(String),
    Call(Vec<Arg>),
    Item(Expr),
    Slice(Option<Expr>, Option<Expr>),
}

fn apply_postfix(obj: Expr, (postfix, end): (Postfix, usize)) -> Expr {
    let span = obj.outer_span.start..end;
    let obj = Box::new(obj);
    let kind = match postfix {
        Postfix::Attr(name) => ExprKind::Attr { obj, name },
        Postfix::Call(args) => ExprKind::Call { callee: obj, args },
        Postfix::Item(index) => ExprKind::Item {
            obj,
            index: Box::new(index),
        },
        Postfix::Slice(index1, index2) => ExprKind::Slice {
            obj,
            index1: index1.map(Box::new),
            index2: index2.map(Box::new),
        },
    };
    Expr::new(kind, span)
}

fn apply_binary(left: Expr, (op, right): (BinaryOp, Expr)) -> Expr {
    let span = left.outer_span.start..right.outer_span.end;
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn apply_unary((op, start): (UnaryOp, usize), obj: Expr) -> Expr {
    let span = start..obj.outer_span.end;
    Expr::new(
        ExprKind::Unary {
            op,
            obj: Box::new(obj),
        },
        span,
    )
}

/// Create the parser for vSQL expressions.
///
/// The parser is generic over the input type, accepting any `ValueInput`
/// that produces `Token` values with `SimpleSpan` spans.
pub fn parser<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, Expr, extra::Err<Rich<'tokens, Token<'src>, SimpleSpan>>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    recursive(|expr| {
        // ======================================================================
        // Atoms
        // ======================================================================

        let literal = select! {
            Token::None => Literal::None,
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            Token::Int(s) => int_literal(s),
            Token::Float(s) => float_literal(s),
            Token::Str(s) => Literal::Str(s),
            Token::Date(s) => date_literal(s),
            Token::Color(s) => color_literal(s),
        }
        .map_with(|literal, e| Expr::new(ExprKind::Const(literal), to_span(e.span())))
        .labelled("literal");

        let ident = select! {
            Token::Ident(s) => s.to_string(),
        }
        .labelled("name");

        let name = ident
            .clone()
            .map_with(|name, e| Expr::new(ExprKind::Name(name), to_span(e.span())));

        let list = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map_with(|items, e| Expr::new(ExprKind::List(items), to_span(e.span())));

        // `{}` would be an empty dict, so the empty set is written `{/}`
        let empty_set = just(Token::LBrace)
            .then(just(Token::Slash))
            .then(just(Token::RBrace))
            .map_with(|_, e| Expr::new(ExprKind::Set(Vec::new()), to_span(e.span())));

        let set = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map_with(|items, e| Expr::new(ExprKind::Set(items), to_span(e.span())));

        let parenthesized = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with(|inner: Expr, e| inner.parenthesized(to_span(e.span())));

        let atom = choice((literal, name, list, empty_set, set, parenthesized)).boxed();

        // ======================================================================
        // Attribute access, calls and subscripts
        // ======================================================================

        let arg = choice((
            just(Token::StarStar)
                .ignore_then(expr.clone())
                .map(Arg::StarStar),
            just(Token::Star).ignore_then(expr.clone()).map(Arg::Star),
            ident
                .clone()
                .then_ignore(just(Token::Assign))
                .then(expr.clone())
                .map(|(name, value)| Arg::Keyword(name, value)),
            expr.clone().map(Arg::Positional),
        ));

        let call = arg
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(Postfix::Call);

        let attr = just(Token::Dot).ignore_then(ident).map(Postfix::Attr);

        let subscript = expr
            .clone()
            .or_not()
            .then(just(Token::Colon).ignore_then(expr.clone().or_not()).or_not())
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .try_map(|(index1, index2), span| match (index1, index2) {
                (Some(index), None) => Ok(Postfix::Item(index)),
                (index1, Some(index2)) => Ok(Postfix::Slice(index1, index2)),
                (None, None) => Err(Rich::custom(span, "expected an index")),
            });

        let postfix = atom
            .foldl(
                choice((attr, call, subscript))
                    .map_with(|postfix, e| {
                        let span: SimpleSpan = e.span();
                        (postfix, span.end)
                    })
                    .repeated(),
                apply_postfix,
            )
            .boxed();

        // ======================================================================
        // Operators
        // ======================================================================

        let unary = select! {
            Token::Minus => UnaryOp::Neg,
            Token::Tilde => UnaryOp::BitNot,
        }
        .map_with(|op, e| {
            let span: SimpleSpan = e.span();
            (op, span.start)
        })
        .repeated()
        .foldr(postfix, apply_unary);

        let product = unary.clone().foldl(
            select! {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::TrueDiv,
                Token::SlashSlash => BinaryOp::FloorDiv,
                Token::Percent => BinaryOp::Mod,
            }
            .then(unary)
            .repeated(),
            apply_binary,
        );

        let sum = product.clone().foldl(
            select! {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
            }
            .then(product)
            .repeated(),
            apply_binary,
        );

        let shift = sum.clone().foldl(
            select! {
                Token::Shl => BinaryOp::ShiftLeft,
                Token::Shr => BinaryOp::ShiftRight,
            }
            .then(sum)
            .repeated(),
            apply_binary,
        );

        let bitand = shift
            .clone()
            .foldl(just(Token::Amp).to(BinaryOp::BitAnd).then(shift).repeated(), apply_binary);

        let bitxor = bitand
            .clone()
            .foldl(just(Token::Caret).to(BinaryOp::BitXor).then(bitand).repeated(), apply_binary);

        let bitor = bitxor
            .clone()
            .foldl(just(Token::Pipe).to(BinaryOp::BitOr).then(bitxor).repeated(), apply_binary)
            .boxed();

        // Two-token operators first
        let comparison_op = choice((
            just(Token::Not).then(just(Token::In)).to(BinaryOp::NotContains),
            just(Token::Is).then(just(Token::Not)).to(BinaryOp::IsNot),
            select! {
                Token::EqEq => BinaryOp::Eq,
                Token::Ne => BinaryOp::Ne,
                Token::Lt => BinaryOp::Lt,
                Token::Le => BinaryOp::Le,
                Token::Gt => BinaryOp::Gt,
                Token::Ge => BinaryOp::Ge,
                Token::In => BinaryOp::Contains,
                Token::Is => BinaryOp::Is,
            },
        ));

        let comparison = bitor
            .clone()
            .foldl(comparison_op.then(bitor).repeated(), apply_binary);

        let not = just(Token::Not)
            .map_with(|_, e| {
                let span: SimpleSpan = e.span();
                (UnaryOp::Not, span.start)
            })
            .repeated()
            .foldr(comparison, apply_unary);

        let and = not
            .clone()
            .foldl(just(Token::And).to(BinaryOp::And).then(not).repeated(), apply_binary);

        let or = and
            .clone()
            .foldl(just(Token::Or).to(BinaryOp::Or).then(and).repeated(), apply_binary)
            .boxed();

        // `a if c else b`, the else branch nests to the right
        or.clone()
            .then(
                just(Token::If)
                    .ignore_then(or)
                    .then_ignore(just(Token::Else))
                    .then(expr)
                    .or_not(),
            )
            .map(|(objif, rest): (Expr, Option<(Expr, Expr)>)| match rest {
                None => objif,
                Some((objcond, objelse)) => {
                    let span = objif.outer_span.start..objelse.outer_span.end;
                    Expr::new(
                        ExprKind::If {
                            objif: Box::new(objif),
                            objcond: Box::new(objcond),
                            objelse: Box::new(objelse),
                        },
                        span,
                    )
                }
            })
    })
    .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::lex;

    fn parse_str(input: &str) -> Expr {
        let tokens = lex(input).expect("lexing should succeed");
        let len = input.len();
        let token_stream = tokens.as_slice().map(
            (len..len).into(),
            |(tok, span): &(Token<'_>, SimpleSpan)| (tok, span),
        );
        let expr = parser().parse(token_stream).into_result().expect("parsing should succeed");
        expr
    }

    fn text(input: &str, span: &Span) -> String {
        input[span.clone()].to_string()
    }

    #[test]
    fn test_precedence() {
        let expr = parse_str("1 + 2 * 3");
        let ExprKind::Binary { op, right, .. } = &expr.kind else {
            panic!("expected binary, got {:?}", expr.kind);
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));

        let expr = parse_str("not a == b and c");
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_parenthesized_spans() {
        let input = "(a + b) * c";
        let expr = parse_str(input);
        let ExprKind::Binary { left, .. } = &expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(text(input, &left.span), "a + b");
        assert_eq!(text(input, &left.outer_span), "(a + b)");
        assert_eq!(text(input, &expr.span), input);
    }

    #[test]
    fn test_postfix_chain() {
        let input = "p.name.upper()[1:]";
        let expr = parse_str(input);
        let ExprKind::Slice { obj, index1, index2 } = &expr.kind else {
            panic!("expected slice");
        };
        assert!(index1.is_some());
        assert!(index2.is_none());
        assert!(matches!(obj.kind, ExprKind::Call { .. }));
        assert_eq!(text(input, &obj.span), "p.name.upper()");
    }

    #[test]
    fn test_two_token_operators() {
        assert!(matches!(
            parse_str("a not in b").kind,
            ExprKind::Binary { op: BinaryOp::NotContains, .. }
        ));
        assert!(matches!(
            parse_str("a is not None").kind,
            ExprKind::Binary { op: BinaryOp::IsNot, .. }
        ));
    }

    #[test]
    fn test_if_else() {
        let expr = parse_str("1 if x else 2 if y else 3");
        let ExprKind::If { objelse, .. } = &expr.kind else {
            panic!("expected if");
        };
        assert!(matches!(objelse.kind, ExprKind::If { .. }));
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            parse_str("#f00").kind,
            ExprKind::Const(Literal::Color(Color::new(255, 0, 0, 255)))
        );
        assert_eq!(
            parse_str("@(2000-02-30)").kind,
            ExprKind::Const(Literal::Malformed(ErrorKind::ConstDate))
        );
        assert_eq!(parse_str("0x10").kind, ExprKind::Const(Literal::Int(16)));
        assert_eq!(parse_str("{/}").kind, ExprKind::Set(vec![]));
    }

    #[test]
    fn test_call_arguments() {
        let expr = parse_str("f(1, x=2, *y, **z)");
        let ExprKind::Call { args, .. } = &expr.kind else {
            panic!("expected call");
        };
        assert!(matches!(args[0], Arg::Positional(_)));
        assert!(matches!(args[1], Arg::Keyword(ref name, _) if name == "x"));
        assert!(matches!(args[2], Arg::Star(_)));
        assert!(matches!(args[3], Arg::StarStar(_)));
    }
}
