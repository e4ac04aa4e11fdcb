//! A recursive-ascent parser for sums and products of non-negative integers.
//!
//! Each LR(0) state of the grammar below is realised as an ordinary function,
//! so the call stack plays the role of the parse stack.
//!
//! ```text
//! 1. start  -> expr
//! 2. expr   -> expr '+' term
//! 3. expr   -> term
//! 4. term   -> term '*' factor
//! 5. term   -> factor
//! 6. factor -> INTEGER
//! ```

pub mod eval;
pub mod harness;
pub mod lexer;
pub mod parser;
pub mod syntax;

pub use crate::{eval::evaluate, parser::parse};
