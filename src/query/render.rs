//! Layout tokens for rendering a query.
//!
//! Clauses are assembled as a flat stream of text, line breaks and indent
//! level changes. Serializing with an indent string lays the query out on
//! indented lines; an empty indent produces a single line.

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Text(String),
    Newline,
    Indent,
    Dedent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Token::Text(text.into()))
    }

    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }

    pub fn indent(&mut self) -> &mut Self {
        self.push(Token::Indent)
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.push(Token::Dedent)
    }

    /// A clause keyword followed by its items on indented lines.
    pub fn clause<I, S>(&mut self, keyword: &str, items: I, separator: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text(keyword).newline().indent();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.text(separator).newline();
            }
            self.text(item);
        }
        self.newline().dedent()
    }

    pub fn serialize(&self, indent: &str) -> String {
        let mut out = String::new();
        let mut level = 0usize;
        let mut first = true;
        for token in &self.tokens {
            match token {
                Token::Newline => {
                    if !indent.is_empty() {
                        out.push('\n');
                    }
                    first = true;
                }
                Token::Indent => level += 1,
                Token::Dedent => level = level.saturating_sub(1),
                Token::Text(text) => {
                    if first {
                        if indent.is_empty() {
                            if !out.is_empty() {
                                out.push(' ');
                            }
                        } else {
                            out.push_str(&indent.repeat(level));
                        }
                        first = false;
                    }
                    out.push_str(text);
                }
            }
        }
        out.truncate(out.trim_end_matches('\n').len());
        out
    }
}
