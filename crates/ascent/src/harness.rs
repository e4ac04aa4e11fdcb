//! Differential testing against a reference evaluator.

use crate::{eval::evaluate, parser::parse};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

/// Operands are drawn from `0..OPERAND_LIMIT`.
pub const OPERAND_LIMIT: usize = 10_000;

/// The number of operands in a generated expression.
pub const MIN_OPERANDS: usize = 2;
pub const MAX_OPERANDS: usize = 10;

/// Generate a well-formed expression with distinct operands and random
/// operators, lexemes separated by single spaces.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let k = rng.gen_range(MIN_OPERANDS..=MAX_OPERANDS);
    let operands = index::sample(&mut *rng, OPERAND_LIMIT, k);

    let mut input = String::new();
    for (i, n) in operands.into_iter().enumerate() {
        if i > 0 {
            input.push_str(if rng.gen_bool(0.5) { " + " } else { " * " });
        }
        input.push_str(&n.to_string());
    }
    input
}

/// Evaluate a well-formed expression as a sum of products, without building a
/// tree. Returns `None` if the input is not of the form `INT (OP INT)*`.
pub fn reference_eval(input: &str) -> Option<u64> {
    let mut sum = 0u64;
    let mut product = 1u64;
    let mut expect_operand = true;

    for lexeme in input.split_whitespace() {
        match (expect_operand, lexeme) {
            (false, "+") => {
                sum = sum.wrapping_add(product);
                product = 1;
            }
            (false, "*") => (),
            (true, _) if lexeme.bytes().all(|b| b.is_ascii_digit()) => {
                product = product.wrapping_mul(lexeme.parse().ok()?);
            }
            _ => return None,
        }
        expect_operand = !expect_operand;
    }

    if expect_operand {
        return None;
    }
    Some(sum.wrapping_add(product))
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The number of expressions to check.
    pub cases: usize,
    /// The generator seed. A fresh one is picked when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cases: 1000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub input: String,
    /// The parser's result, or the parse error message.
    pub got: String,
    pub expected: String,
}

#[derive(Debug)]
pub struct Report {
    pub seed: u64,
    pub cases: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the differential test.
pub fn run(config: &Config) -> Report {
    let seed = config.seed.unwrap_or_else(rand::random);
    let span = tracing::debug_span!("harness", seed);
    let _entered = span.enter();
    tracing::info!("running {} cases with seed {}", config.cases, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut failures = vec![];
    for _ in 0..config.cases {
        let input = generate(&mut rng);
        if let Some(failure) = check(&input) {
            tracing::debug!("mismatch: {:?}", failure);
            failures.push(failure);
        }
    }

    Report {
        seed,
        cases: config.cases,
        failures,
    }
}

/// Compare the parser against the reference evaluator on a single input.
pub fn check(input: &str) -> Option<Failure> {
    let expected = match reference_eval(input) {
        Some(n) => n.to_string(),
        None => "<malformed>".to_owned(),
    };
    let got = match parse(input) {
        Ok(expr) => evaluate(expr.node()).to_string(),
        Err(err) => err.to_string(),
    };
    (got != expected).then(|| Failure {
        input: input.to_owned(),
        got,
        expected,
    })
}
