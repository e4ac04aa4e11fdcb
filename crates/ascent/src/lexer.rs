//! Whitespace-separated lexemes.

use logos::Logos;
use std::fmt;

/// A lexeme of the input.
///
/// Any maximal run of non-whitespace characters that is neither an operator
/// nor an integer literal is kept as `Other`, so that the parser can report it.
#[derive(Debug, Copy, Clone, Logos, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token<'source> {
    #[token("+")]
    Plus,

    #[token("*")]
    Star,

    #[regex(r"[0-9]+", priority = 3)]
    Int(&'source str),

    #[regex(r"[^\s]+", priority = 1)]
    Other(&'source str),
}

impl<'source> Token<'source> {
    pub fn as_str(&self) -> &'source str {
        match self {
            Self::Plus => "+",
            Self::Star => "*",
            Self::Int(s) | Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split the input into its lexemes, left to right.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = vec![];
    while let Some(res) = lexer.next() {
        // unreachable in practice: `Other` covers every non-whitespace run.
        let token = res.unwrap_or_else(|()| Token::Other(lexer.slice()));
        tracing::trace!("lexeme {:?} at {:?}", token, lexer.span());
        tokens.push(token);
    }
    tokens
}

/// A left-to-right, never rewound view over the lexemes.
#[derive(Debug, Clone)]
pub struct TokenStream<'t, 'source> {
    tokens: &'t [Token<'source>],
    position: usize,
}

impl<'t, 'source> TokenStream<'t, 'source> {
    pub fn new(tokens: &'t [Token<'source>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Return the head lexeme, or `None` once the stream is exhausted.
    pub fn peek(&self) -> Option<Token<'source>> {
        self.tokens.get(self.position).copied()
    }

    /// Advance past the head lexeme.
    pub fn bump(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// The index of the head lexeme.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            lex("  12 +\t3\n*  4 "),
            [
                Token::Int("12"),
                Token::Plus,
                Token::Int("3"),
                Token::Star,
                Token::Int("4"),
            ]
        );
    }

    #[test]
    fn keeps_unknown_runs_whole() {
        assert_eq!(
            lex("1+2 ++ 3a -4"),
            [
                Token::Other("1+2"),
                Token::Other("++"),
                Token::Other("3a"),
                Token::Other("-4"),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(lex("").is_empty());
        assert!(lex(" \t\n").is_empty());
    }

    #[test]
    fn stream_peek_and_bump() {
        let tokens = lex("1 + 2");
        let mut stream = TokenStream::new(&tokens);
        assert_eq!(stream.peek(), Some(Token::Int("1")));
        stream.bump();
        assert_eq!(stream.peek(), Some(Token::Plus));
        assert_eq!(stream.position(), 1);
        stream.bump();
        stream.bump();
        assert!(stream.is_empty());
        assert_eq!(stream.peek(), None);
        stream.bump();
        assert_eq!(stream.position(), 3);
    }
}
