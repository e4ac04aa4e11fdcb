//! The recursive-ascent parser.
//!
//! Every LR(0) state of the grammar is a function named after it. A shift
//! advances the token stream and calls the goto state with the shifted
//! symbol as an argument; a reduction returns the new nonterminal to the
//! caller, which is the state owning the outgoing edge for it. The left
//! recursive rules 2 and 4 are absorbed by loops in the states whose item
//! sets contain their handles, so the call depth does not grow with the
//! input.
//!
//! ```text
//! state 0:  start -> . expr        expr -> . expr '+' term    expr -> . term
//!           term -> . term '*' factor   term -> . factor   factor -> . INTEGER
//! state 1:  start -> expr .        expr -> expr . '+' term
//! state 2:  expr -> term .         term -> term . '*' factor
//! state 3:  term -> factor .
//! state 4:  factor -> INTEGER .
//! state 5:  expr -> expr '+' . term    term -> . term '*' factor   ...
//! state 6:  term -> term '*' . factor  factor -> . INTEGER
//! state 7:  expr -> expr '+' term .    term -> term . '*' factor
//! state 8:  term -> term '*' factor .
//! ```

use crate::{
    lexer::{lex, Token, TokenStream},
    syntax::{Expr, Factor, Term},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The head lexeme cannot extend any viable prefix.
    ///
    /// `lexeme` is empty when the input ended too early.
    #[error("unexpected token: {lexeme}")]
    UnexpectedToken { lexeme: String, position: usize },

    #[error("integer literal out of range: {lexeme}")]
    LiteralOutOfRange { lexeme: String, position: usize },
}

impl ParseError {
    fn unexpected(stream: &TokenStream<'_, '_>) -> Self {
        Self::UnexpectedToken {
            lexeme: stream
                .peek()
                .map_or_else(String::new, |t| t.as_str().to_owned()),
            position: stream.position(),
        }
    }

    /// The index of the offending lexeme.
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. } | Self::LiteralOutOfRange { position, .. } => {
                *position
            }
        }
    }
}

/// Lex and parse the input.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = lex(input);
    parse_tokens(&mut TokenStream::new(&tokens))
}

/// Parse a complete expression from the stream.
///
/// On failure the residual of the stream is unspecified.
pub fn parse_tokens(stream: &mut TokenStream<'_, '_>) -> Result<Expr, ParseError> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    state0(stream)
}

fn state0(stream: &mut TokenStream<'_, '_>) -> Result<Expr, ParseError> {
    let lit = match stream.peek() {
        Some(Token::Int(lit)) => lit,
        _ => return Err(ParseError::unexpected(stream)),
    };
    let position = stream.position();
    tracing::trace!("state 0: shift {}", lit);
    stream.bump();

    let factor = state4(lit, position)?;
    let term = state3(factor);
    let expr = state2(stream, term)?;
    state1(stream, expr)
}

fn state1(stream: &mut TokenStream<'_, '_>, mut expr: Expr) -> Result<Expr, ParseError> {
    while let Some(Token::Plus) = stream.peek() {
        tracing::trace!("state 1: shift +");
        stream.bump();
        expr = state5(stream, expr)?;
    }

    match stream.peek() {
        None => {
            tracing::trace!("state 1: accept");
            Ok(expr)
        }
        Some(..) => Err(ParseError::unexpected(stream)),
    }
}

fn state2(stream: &mut TokenStream<'_, '_>, mut term: Term) -> Result<Expr, ParseError> {
    while let Some(Token::Star) = stream.peek() {
        tracing::trace!("state 2: shift *");
        stream.bump();
        term = state6(stream, term)?;
    }

    tracing::trace!("reduce: expr -> term");
    Ok(Expr::from(term))
}

fn state3(factor: Factor) -> Term {
    tracing::trace!("reduce: term -> factor");
    Term::from(factor)
}

fn state4(lit: &str, position: usize) -> Result<Factor, ParseError> {
    tracing::trace!("reduce: factor -> INTEGER");
    let value = lit.parse::<u64>().map_err(|_| ParseError::LiteralOutOfRange {
        lexeme: lit.to_owned(),
        position,
    })?;
    Ok(Factor::int(value))
}

fn state5(stream: &mut TokenStream<'_, '_>, expr: Expr) -> Result<Expr, ParseError> {
    let lit = match stream.peek() {
        Some(Token::Int(lit)) => lit,
        _ => return Err(ParseError::unexpected(stream)),
    };
    let position = stream.position();
    tracing::trace!("state 5: shift {}", lit);
    stream.bump();

    let factor = state4(lit, position)?;
    let term = state3(factor);
    state7(stream, expr, term)
}

fn state6(stream: &mut TokenStream<'_, '_>, term: Term) -> Result<Term, ParseError> {
    let lit = match stream.peek() {
        Some(Token::Int(lit)) => lit,
        _ => return Err(ParseError::unexpected(stream)),
    };
    let position = stream.position();
    tracing::trace!("state 6: shift {}", lit);
    stream.bump();

    let factor = state4(lit, position)?;
    Ok(state8(term, factor))
}

fn state7(
    stream: &mut TokenStream<'_, '_>,
    expr: Expr,
    mut term: Term,
) -> Result<Expr, ParseError> {
    while let Some(Token::Star) = stream.peek() {
        tracing::trace!("state 7: shift *");
        stream.bump();
        term = state6(stream, term)?;
    }

    tracing::trace!("reduce: expr -> expr '+' term");
    Ok(Expr::add(expr, term))
}

fn state8(term: Term, factor: Factor) -> Term {
    tracing::trace!("reduce: term -> term '*' factor");
    Term::mul(term, factor)
}
