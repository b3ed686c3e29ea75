use crate::interpreter::config::Config;
use crate::interpreter::decimal::{math, Context as DecimalContext, Decimal};
use crate::interpreter::error::{EvaluationError, SyntaxError};
use crate::interpreter::parser::to_postfix;
use crate::interpreter::token::{Constant, Token};
use crate::interpreter::{lexer, preprocessor};
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::debug;
use once_cell::sync::OnceCell;
use std::fmt;
use std::fmt::Formatter;

/// The outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// `normalized` is the token sequence that was actually evaluated, after parentheses and
    /// implicit multiplications were inserted.
    Success {
        value: Decimal,
        normalized: Vec<String>,
    },
    /// `sequence` is the input sequence, unchanged.
    Failure {
        error: EvaluationError,
        sequence: Vec<String>,
    },
}

impl Evaluation {
    pub fn is_success(&self) -> bool {
        matches!(self, Evaluation::Success { .. })
    }

    pub fn value(&self) -> Option<&Decimal> {
        match self {
            Evaluation::Success { value, .. } => Some(value),
            Evaluation::Failure { .. } => None,
        }
    }

    /// The normalized sequence on success, the original one on failure.
    pub fn sequence(&self) -> &[String] {
        match self {
            Evaluation::Success { normalized, .. } => normalized,
            Evaluation::Failure { sequence, .. } => sequence,
        }
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            Evaluation::Success { .. } => None,
            Evaluation::Failure { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Decimal, EvaluationError> {
        match self {
            Evaluation::Success { value, .. } => Ok(value),
            Evaluation::Failure { error, .. } => Err(error),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Success { value, normalized } => {
                write!(f, "{} = {}", normalized.iter().join(" "), value)
            }
            Evaluation::Failure { error, sequence } => {
                write!(f, "{}: {}", sequence.iter().join(" "), error)
            }
        }
    }
}

/// Evaluates token sequences at a fixed precision.
///
/// π and e are computed the first time an expression needs them and reused afterwards, so an
/// evaluator is worth keeping around. It can be shared between threads.
///
/// # Examples
///
/// ```
/// use scientific_evaluator::interpreter::evaluator::Evaluator;
///
/// let evaluator = Evaluator::new();
/// let evaluation = evaluator.evaluate(&["2", "+", "3", "×", "4"]);
/// assert_eq!(evaluation.value().map(ToString::to_string), Some("14".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct Evaluator {
    config: Config,
    pi: OnceCell<Decimal>,
    e: OnceCell<Decimal>,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    pub fn with_config(config: Config) -> Self {
        Evaluator {
            config,
            pi: OnceCell::new(),
            e: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The value of a constant at this evaluator's precision.
    pub fn constant(&self, constant: Constant) -> &Decimal {
        let context = self.context();
        match constant {
            Constant::Pi => self.pi.get_or_init(|| math::pi(context)),
            Constant::E => self.e.get_or_init(|| math::e(context)),
        }
    }

    /// Evaluates a sequence of token strings, such as `["2", "π"]`.
    ///
    /// Never panics and never returns an error directly: every failure is described by
    /// [`Evaluation::Failure`]. An empty sequence evaluates to zero.
    pub fn evaluate<S: AsRef<str>>(&self, sequence: &[S]) -> Evaluation {
        let sequence: Vec<String> = sequence
            .iter()
            .map(|token| token.as_ref().to_string())
            .collect();
        if sequence.is_empty() {
            return Evaluation::Success {
                value: Decimal::zero(),
                normalized: sequence,
            };
        }

        let tokens = self.normalized_tokens(&sequence);
        match self.evaluate_tokens(tokens.clone()) {
            Ok(value) => Evaluation::Success {
                value,
                normalized: tokens.iter().map(ToString::to_string).collect(),
            },
            Err(error) => Evaluation::Failure {
                error: EvaluationError::from_anyhow(error),
                sequence,
            },
        }
    }

    /// Tokenizes and evaluates a raw expression such as `"2sin 30° + 1"`.
    ///
    /// If the expression cannot be tokenized, the failure carries the expression itself as
    /// its only sequence element.
    pub fn evaluate_expression(&self, expression: &str) -> Evaluation {
        match lexer::tokenize(expression) {
            Ok(tokens) => self.evaluate(&tokens),
            Err(error) => Evaluation::Failure {
                error: EvaluationError::from_anyhow(error),
                sequence: vec![expression.to_string()],
            },
        }
    }

    /// The token sequence after preprocessing, as it would be evaluated.
    pub fn normalize<S: AsRef<str>>(&self, sequence: &[S]) -> Vec<String> {
        self.normalized_tokens(sequence)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn normalized_tokens<S: AsRef<str>>(&self, sequence: &[S]) -> Vec<Token> {
        let tokens = sequence
            .iter()
            .map(|text| Token::classify(text.as_ref()))
            .collect();
        preprocessor::normalize(tokens, self.config.mode())
    }

    fn evaluate_tokens(&self, tokens: Vec<Token>) -> Result<Decimal> {
        let postfix = to_postfix(tokens, self.config.mode())
            .context("Failed to convert expression to postfix")?;
        debug!("Postfix tokens: {:?}", postfix);
        let value = evaluate_postfix(&postfix, self.context(), self.config.factorial_limit, |constant| {
            self.constant(constant).clone()
        })?;
        Ok(value.strip_trailing_zeros())
    }

    fn context(&self) -> DecimalContext {
        self.config.context()
    }
}

/// Runs the postfix tokens on a value stack.
pub(crate) fn evaluate_postfix(
    postfix: &[Token],
    context: DecimalContext,
    factorial_limit: u32,
    constant: impl Fn(Constant) -> Decimal,
) -> Result<Decimal> {
    let mut stack: Vec<Decimal> = Vec::with_capacity(postfix.len());
    for token in postfix {
        match token {
            Token::Literal(value) => stack.push(value.clone()),
            Token::Constant(name) => stack.push(constant(*name)),
            Token::Operator(operator) => {
                let arity = operator.arity();
                if stack.len() < arity {
                    bail!(SyntaxError::MissingOperand {
                        operator: operator.to_string(),
                        arity
                    });
                }
                let operands = stack.split_off(stack.len() - arity);
                let result = operator
                    .apply(&operands, context, factorial_limit)
                    .with_context(|| format!("Failed to apply {}", operator))?;
                stack.push(result);
            }
            Token::Unknown(text) => bail!(SyntaxError::UnknownToken(text.clone())),
            grouping => bail!(SyntaxError::UnknownToken(grouping.to_string())),
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => bail!(SyntaxError::Incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::error::{ArithmeticError, ErrorKind};
    use crate::interpreter::operator::Operator;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn decimal(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn run(postfix: &[Token]) -> Result<Decimal> {
        evaluate_postfix(postfix, DecimalContext::DECIMAL128, 4000, |constant| {
            match constant {
                Constant::Pi => decimal("3.14"),
                Constant::E => decimal("2.72"),
            }
        })
    }

    #[test]
    fn postfix_operands_are_taken_leftmost_first() {
        let postfix = vec![
            Token::Literal(decimal("10")),
            Token::Literal(decimal("4")),
            Token::Operator(Operator::Subtract),
        ];

        assert_eq!(run(&postfix).unwrap(), decimal("6"));
    }

    #[test]
    fn constants_come_from_the_provider() {
        let postfix = vec![
            Token::Literal(decimal("2")),
            Token::Constant(Constant::Pi),
            Token::Operator(Operator::ImplicitMultiply),
        ];

        assert_eq!(run(&postfix).unwrap(), decimal("6.28"));
    }

    #[test]
    fn operator_without_operands_is_a_syntax_error() {
        let postfix = vec![Token::Literal(decimal("1")), Token::Operator(Operator::Add)];

        let error = EvaluationError::from_anyhow(run(&postfix).unwrap_err());

        assert_eq!(
            error,
            EvaluationError::Syntax(SyntaxError::MissingOperand {
                operator: "+".to_string(),
                arity: 2
            })
        );
    }

    #[test]
    fn leftover_values_are_a_syntax_error() {
        let postfix = vec![Token::Literal(decimal("1")), Token::Literal(decimal("2"))];

        let error = EvaluationError::from_anyhow(run(&postfix).unwrap_err());

        assert_eq!(error, EvaluationError::Syntax(SyntaxError::Incomplete));
    }

    #[test]
    fn unknown_token_is_reported() {
        let postfix = vec![Token::Unknown("x".to_string())];

        let error = EvaluationError::from_anyhow(run(&postfix).unwrap_err());

        assert_eq!(
            error,
            EvaluationError::Syntax(SyntaxError::UnknownToken("x".to_string()))
        );
    }

    #[test]
    fn arithmetic_error_keeps_its_kind_through_context() {
        let postfix = vec![
            Token::Literal(decimal("5")),
            Token::Literal(Decimal::zero()),
            Token::Operator(Operator::Divide),
        ];

        let error = EvaluationError::from_anyhow(run(&postfix).unwrap_err());

        assert_eq!(
            error,
            EvaluationError::Arithmetic(ArithmeticError::DivisionByZero)
        );
        assert_eq!(error.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn constants_are_computed_once_per_evaluator() {
        let evaluator = Evaluator::new();

        let first = evaluator.constant(Constant::Pi) as *const Decimal;
        let second = evaluator.constant(Constant::Pi) as *const Decimal;

        assert_eq!(first, second);
        assert_eq!(
            evaluator.constant(Constant::E).to_string(),
            "2.718281828459045235360287471352662"
        );
    }

    #[test]
    fn evaluator_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }

    #[test]
    fn evaluation_accessors() {
        let evaluator = Evaluator::new();

        let success = evaluator.evaluate(&["2", "π"]);
        let failure = evaluator.evaluate(&["5", "÷", "0"]);

        assert!(success.is_success());
        assert_eq!(success.sequence(), ["2", "i×", "π"]);
        assert!(success.error().is_none());
        assert!(!failure.is_success());
        assert_eq!(failure.sequence(), ["5", "÷", "0"]);
        assert_eq!(failure.value(), None);
        assert_eq!(failure.error().map(EvaluationError::kind), Some(ErrorKind::Arithmetic));
    }

    struct RecordingLogger;

    static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static LOGGER: RecordingLogger = RecordingLogger;

    impl log::Log for RecordingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = RECORDS.lock() {
                records.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn pipeline_stages_are_traced_through_log() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Debug);

        Evaluator::new().evaluate(&["1", "+", "2"]);

        let records = RECORDS.lock().unwrap();
        assert!(records.iter().any(|record| record.starts_with("Normalized tokens:")));
        assert!(records.iter().any(|record| record.starts_with("Postfix tokens:")));
    }

    #[test]
    fn normalize_exposes_preprocessed_sequence() {
        let evaluator = Evaluator::new();

        let normalized = evaluator.normalize(&["2", "sin", "-", "30", "+", "|", "-", "1", "|"]);

        assert_eq!(
            normalized,
            ["2", "i×", "sin", "(", "-", "30", ")", "+", "|", "-", "1", "|"]
        );
    }

    #[test]
    fn evaluation_is_displayed_with_its_sequence() {
        let evaluator = Evaluator::new();

        let evaluation = evaluator.evaluate(&["1", "+", "1"]);

        assert_eq!(evaluation.to_string(), "1 + 1 = 2");
    }

    #[test]
    fn lower_precision_rounds_results() {
        let evaluator = Evaluator::with_config(Config {
            precision: 5,
            ..Config::default()
        });

        let evaluation = evaluator.evaluate(&["1", "÷", "3"]);

        assert_eq!(evaluation.into_result().unwrap().to_string(), "0.33333");
    }

    #[test]
    fn factorial_limit_is_configurable() {
        let evaluator = Evaluator::with_config(Config {
            factorial_limit: 10,
            ..Config::default()
        });

        assert!(evaluator.evaluate(&["10", "!"]).is_success());
        assert!(!evaluator.evaluate(&["11", "!"]).is_success());
    }

    #[test]
    fn untokenizable_expression_fails_with_raw_sequence() {
        let evaluator = Evaluator::new();

        let evaluation = evaluator.evaluate_expression("2 + x");

        assert_eq!(evaluation.sequence(), ["2 + x"]);
        assert_eq!(
            evaluation.error(),
            Some(&EvaluationError::Syntax(SyntaxError::UnexpectedCharacter {
                character: 'x',
                position: 4
            }))
        );
    }
}
