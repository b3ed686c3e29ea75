mod infix_converter;

use crate::interpreter::config::Mode;
use crate::interpreter::parser::infix_converter::infix_to_postfix;
use crate::interpreter::token::Token;
use anyhow::Result;

/// Reorders the given infix tokens into postfix (reverse Polish) order.
///
/// # Arguments
///
/// * `infix_tokens`: Normalized tokens, in infix format.
/// * `mode`: Whether unclosed parentheses and bars are tolerated.
///
/// returns: The same tokens in postfix order, with an `abs` operator for every bar group.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use scientific_evaluator::interpreter::config::Mode;
/// use scientific_evaluator::interpreter::parser::to_postfix;
/// use scientific_evaluator::interpreter::token::Token;
///
/// let infix_tokens: Vec<Token> = ["2", "+", "3", "×", "4"]
///     .iter()
///     .map(|text| Token::classify(text))
///     .collect();
/// let postfix_tokens = to_postfix(infix_tokens, Mode::Lenient)?;
/// assert_eq!(postfix_tokens.len(), 5);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn to_postfix(infix_tokens: Vec<Token>, mode: Mode) -> Result<Vec<Token>> {
    infix_to_postfix(infix_tokens, mode)
}
