use anyhow::Context as _;
use ascent::{
    harness::{self, Config},
    parser::ParseError,
};
use clap::{error::ErrorKind, Parser};
use std::{
    env,
    io::{self, Write as _},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the syntax tree in prefix form before the result.
    #[arg(long)]
    tree: bool,

    /// The generator seed used by `test`.
    #[arg(long)]
    seed: Option<u64>,

    /// The number of expressions checked by `test`.
    #[arg(long, default_value_t = 1000)]
    cases: usize,

    /// An expression such as "2 + 3 * 4", or `test` to run the differential tester.
    #[arg(allow_hyphen_values = true)]
    input: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            tracing::debug!("rejected CLI args: {}", err);
            let program = env::args().next().unwrap_or_else(|| "ascent".to_owned());
            println!("usage: {} [STRING]", program);
            return Ok(ExitCode::SUCCESS);
        }
    };
    tracing::trace!("CLI args = {:?}", args);

    if args.input == "test" {
        return run_tests(&args);
    }

    match calculate(&args) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<ParseError>() {
            Some(parse_err) => {
                eprintln!("{}", parse_err);
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

fn calculate(args: &Args) -> anyhow::Result<()> {
    let expr = ascent::parse(&args.input)?;
    let result = ascent::evaluate(expr.node());

    let mut stdout = io::stdout().lock();
    if args.tree {
        writeln!(stdout, "{}", expr).context("failed to write the syntax tree")?;
    }
    writeln!(stdout, "{}", result).context("failed to write the result")?;
    Ok(())
}

fn run_tests(args: &Args) -> anyhow::Result<ExitCode> {
    let report = harness::run(&Config {
        cases: args.cases,
        seed: args.seed,
    });

    let mut stdout = io::stdout().lock();
    for failure in &report.failures {
        writeln!(stdout, "incorrect output for: {}", failure.input)
            .and_then(|()| writeln!(stdout, "got: {}", failure.got))
            .and_then(|()| writeln!(stdout, "expected: {}", failure.expected))
            .context("failed to write the test report")?;
    }

    if report.passed() {
        writeln!(stdout, "all tests passed!").context("failed to write the test report")?;
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            "{} of {} cases failed (seed = {})",
            report.failures.len(),
            report.cases,
            report.seed
        );
        Ok(ExitCode::FAILURE)
    }
}
