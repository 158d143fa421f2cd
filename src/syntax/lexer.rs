//! Lexer for vSQL expressions.
//!
//! Converts source text into tokens with byte spans. String literals are
//! unescaped here; date and color literals are passed on verbatim, so a
//! malformed one can still become a (flagged) constant node.

use chumsky::prelude::*;

/// A token of a vSQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // ========================================================================
    // Keywords
    // ========================================================================
    None,
    True,
    False,
    And,
    Or,
    Not,
    In,
    Is,
    If,
    Else,

    // ========================================================================
    // Literals
    // ========================================================================
    /// A name (not a keyword).
    Ident(&'src str),
    /// An integer literal as written, including a `0x`/`0o`/`0b` prefix.
    Int(&'src str),
    /// A float literal as written.
    Float(&'src str),
    /// A string literal, unescaped.
    Str(String),
    /// The inside of `@(...)`.
    Date(&'src str),
    /// A color literal including the `#`.
    Color(&'src str),

    // ========================================================================
    // Symbols
    // ========================================================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `//`
    SlashSlash,
    /// `%`
    Percent,
    /// `~`
    Tilde,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `==`
    EqEq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl<'src> std::fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Keywords
            Token::None => write!(f, "None"),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::In => write!(f, "in"),
            Token::Is => write!(f, "is"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),

            // Literals
            Token::Ident(s) | Token::Int(s) | Token::Float(s) | Token::Color(s) => write!(f, "{}", s),
            Token::Str(s) => write!(f, "{:?}", s),
            Token::Date(s) => write!(f, "@({})", s),

            // Symbols
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::StarStar => write!(f, "**"),
            Token::Slash => write!(f, "/"),
            Token::SlashSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::Tilde => write!(f, "~"),
            Token::Amp => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::Shl => write!(f, "<<"),
            Token::Shr => write!(f, ">>"),
            Token::EqEq => write!(f, "=="),
            Token::Ne => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
        }
    }
}

/// Map a name to a keyword token or return Ident.
fn keyword_or_ident(s: &str) -> Token<'_> {
    match s {
        "None" => Token::None,
        "True" => Token::True,
        "False" => Token::False,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "in" => Token::In,
        "is" => Token::Is,
        "if" => Token::If,
        "else" => Token::Else,
        _ => Token::Ident(s),
    }
}

/// Parse `digits` hex digits into the character they encode.
fn hex_escape<'src>(
    prefix: char,
    digits: usize,
) -> impl Parser<'src, &'src str, char, extra::Err<Rich<'src, char>>> + Clone {
    just(prefix).ignore_then(
        one_of("0123456789abcdefABCDEF")
            .repeated()
            .exactly(digits)
            .to_slice()
            .try_map(|hex: &str, span| {
                u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| Rich::custom(span, format!("invalid character code {hex}")))
            }),
    )
}

/// Create a lexer for vSQL expressions.
pub fn lexer<'src>(
) -> impl Parser<'src, &'src str, Vec<(Token<'src>, SimpleSpan)>, extra::Err<Rich<'src, char>>> {
    let ident = text::ident().map(keyword_or_ident);

    // Escape sequences shared by both quote styles
    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('\''),
        just('"'),
        just('a').to('\x07'),
        just('b').to('\x08'),
        just('f').to('\x0c'),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
        hex_escape('x', 2),
        hex_escape('u', 4),
        hex_escape('U', 8),
    )));

    let single_quoted = just('\'')
        .ignore_then(
            choice((escape.clone(), none_of("\\'\n")))
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just('\''));

    let double_quoted = just('"')
        .ignore_then(
            choice((escape, none_of("\\\"\n")))
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just('"'));

    let string_lit = single_quoted.or(double_quoted).map(Token::Str);

    // Integers with a radix prefix
    let radix_int = just('0')
        .then(one_of("xXoObB"))
        .then(any().filter(|c: &char| c.is_ascii_hexdigit()).repeated().at_least(1))
        .to_slice()
        .map(Token::Int);

    let exponent = one_of("eE")
        .then(one_of("+-").or_not())
        .then(text::digits(10));

    // Floats need a fraction, an exponent or both
    let float = text::digits(10)
        .then(just('.').then(text::digits(10)))
        .then(exponent.clone().or_not())
        .to_slice()
        .or(text::digits(10).then(exponent).to_slice())
        .map(Token::Float);

    let int = text::digits(10).to_slice().map(Token::Int);

    let number = choice((radix_int, float, int));

    // Dates: @(2000-02-29) or @(2000-02-29T12:34:56)
    let date = just("@(")
        .ignore_then(none_of(")").repeated().to_slice())
        .then_ignore(just(')'))
        .map(Token::Date);

    // Colors: #fff, #ffff, #ffffff or #ffffffff (validated by the parser)
    let color = just('#')
        .then(any().filter(|c: &char| c.is_ascii_alphanumeric()).repeated())
        .to_slice()
        .map(Token::Color);

    // Symbols (multi-char first, then single-char)
    let symbol = choice((
        just("**").to(Token::StarStar),
        just("//").to(Token::SlashSlash),
        just("<<").to(Token::Shl),
        just(">>").to(Token::Shr),
        just("==").to(Token::EqEq),
        just("!=").to(Token::Ne),
        just("<=").to(Token::Le),
        just(">=").to(Token::Ge),
    ));
    let single_symbol = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just(',').to(Token::Comma),
        just('.').to(Token::Dot),
        just(':').to(Token::Colon),
        just('=').to(Token::Assign),
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
        just('*').to(Token::Star),
        just('/').to(Token::Slash),
        just('%').to(Token::Percent),
        just('~').to(Token::Tilde),
        just('&').to(Token::Amp),
        just('|').to(Token::Pipe),
        just('^').to(Token::Caret),
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
    ));
    let symbol = choice((symbol, single_symbol));

    let token = choice((ident, string_lit, number, date, color, symbol)).map_with(|tok, e| (tok, e.span()));

    token
        .padded()
        .repeated()
        .collect()
        .padded()
        .then_ignore(end())
}

/// Lex a source string into tokens.
pub fn lex(source: &str) -> Result<Vec<(Token<'_>, SimpleSpan)>, Vec<Rich<'_, char>>> {
    let (tokens, errs) = lexer().parse(source).into_output_errors();
    if errs.is_empty() {
        Ok(tokens.unwrap_or_default())
    } else {
        Err(errs)
    }
}
