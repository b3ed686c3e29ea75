pub mod config;
pub mod decimal;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod preprocessor;
pub mod token;

use crate::interpreter::evaluator::{Evaluation, Evaluator};
use crate::interpreter::operator::Operator;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use string_builder::Builder;

/// Evaluates the given token sequence with the default configuration.
///
/// # Arguments
///
/// * `sequence`: The expression as separate tokens, e.g. numbers, operators and function names.
///
/// returns: The value of the expression and its normalized sequence, or why it failed.
///
/// # Examples
///
/// ```
/// use scientific_evaluator::interpreter::evaluate;
///
/// let evaluation = evaluate(&["(", "2", "+", "3", ")", "×", "4"]);
/// assert_eq!(evaluation.value().unwrap().to_string(), "20");
/// ```
pub fn evaluate<S: AsRef<str>>(sequence: &[S]) -> Evaluation {
    Evaluator::new().evaluate(sequence)
}

/// Tokenizes and evaluates the given expression with the default configuration.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The value of the expression and its normalized sequence, or why it failed.
///
/// # Examples
///
/// ```
/// use scientific_evaluator::interpreter::evaluate_expression;
///
/// let evaluation = evaluate_expression("√16 + 3!");
/// assert_eq!(evaluation.value().unwrap().to_string(), "10");
/// ```
pub fn evaluate_expression(expression: &str) -> Evaluation {
    Evaluator::new().evaluate_expression(expression)
}

/// Pretty-prints the given token sequence with added whitespace around binary operators.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use scientific_evaluator::interpreter::tokens_to_string;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = ["2", "i×", "sin", "(", "30", "°", ")", "+", "1"];
/// let pretty_printed_tokens = tokens_to_string(&tokens)?;
/// assert_eq!(pretty_printed_tokens, "2 i× sin(30°) + 1");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string<S: AsRef<str>>(tokens: &[S]) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    let tokens = tokens
        .iter()
        .map(|text| Token::classify(text.as_ref()))
        .collect();
    for token in preprocessor::disambiguate_signs_and_bars(tokens) {
        if token.is_binary_operator() && token != Token::Operator(Operator::Exponentiate) {
            builder.append(" ");
            builder.append(token.to_string());
            builder.append(" ");
        } else {
            builder.append(token.to_string());
        }
    }

    builder.string().context("Failed to build token string")
}
