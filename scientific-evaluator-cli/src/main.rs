use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::{debug, info};
use scientific_evaluator::interpreter::config::Config;
use scientific_evaluator::interpreter::evaluator::{Evaluation, Evaluator};
use scientific_evaluator::interpreter::tokens_to_string;

/// Evaluates the given expression to 34 significant digits
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, e.g. "2sin 30° + 1"
    #[clap(required = true, allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Treat every argument as a single token instead of tokenizing the text
    #[clap(long)]
    tokens: bool,

    /// Reject unbalanced parentheses and bars
    #[clap(long)]
    strict: bool,

    /// Significant digits of the result
    #[clap(long, default_value_t = Config::DEFAULT_PRECISION)]
    precision: u64,

    /// Largest operand accepted by the factorial
    #[clap(long, default_value_t = Config::DEFAULT_FACTORIAL_LIMIT)]
    factorial_limit: u32,

    #[clap(flatten)]
    verbose: Verbosity,
}

impl Arguments {
    fn config(&self) -> Config {
        Config {
            precision: self.precision,
            factorial_limit: self.factorial_limit,
            strict: self.strict,
        }
    }
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    debug!("{:?}", args);

    let evaluator = Evaluator::with_config(args.config());
    let evaluation = if args.tokens {
        evaluator.evaluate(args.expression.as_slice())
    } else {
        evaluator.evaluate_expression(&args.expression.join(" "))
    };
    log_evaluation(&evaluation)?;

    let value = evaluation
        .into_result()
        .with_context(|| format!("Could not evaluate {}", args.expression.join(" ")))?;
    println!("{}", value);
    Ok(())
}

fn log_evaluation(evaluation: &Evaluation) -> Result<()> {
    let sequence = tokens_to_string(evaluation.sequence())?;
    match evaluation {
        Evaluation::Success { .. } => info!("Evaluated {}", sequence),
        Evaluation::Failure { error, .. } => info!("Failed to evaluate {}: {:?}", sequence, error),
    }
    debug!("{}", evaluation);
    Ok(())
}
