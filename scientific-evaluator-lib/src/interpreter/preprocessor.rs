//! Normalization of a classified token sequence before it is parsed.
//!
//! The passes make the grammar forgiving: bare function arguments get parentheses, unmatched
//! parentheses are balanced, minus signs and absolute value bars are disambiguated, and
//! implicit multiplication is made explicit. None of them can fail; anything left malformed
//! is reported by the parser or the evaluator.

use crate::interpreter::config::Mode;
use crate::interpreter::operator::Operator;
use crate::interpreter::token::Token;
use log::debug;

/// Runs every normalization pass, in order.
pub fn normalize(tokens: Vec<Token>, mode: Mode) -> Vec<Token> {
    let tokens = parenthesize_arguments(&tokens);
    let tokens = match mode {
        Mode::Lenient => balance_parentheses(tokens),
        Mode::Strict => tokens,
    };
    let tokens = disambiguate_signs_and_bars(tokens);
    let tokens = insert_implicit_multiplication(tokens);
    debug!("Normalized tokens: {:?}", tokens);
    tokens
}

/// Wraps the argument of every prefix operator not already followed by `(` in parentheses,
/// so `sin 45` becomes `sin(45)` and `√2^3` becomes `√(2^3)`.
pub(crate) fn parenthesize_arguments(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while let Some(token) = tokens.get(index) {
        if token.is_prefix_operator() {
            index = emit_prefix(tokens, index, &mut output);
        } else {
            output.push(token.clone());
            index += 1;
        }
    }
    output
}

/// Emits the prefix operator at `index` together with its parenthesized argument,
/// returning the index of the first token after the argument.
fn emit_prefix(tokens: &[Token], index: usize, output: &mut Vec<Token>) -> usize {
    output.push(tokens[index].clone());
    let start = index + 1;
    if matches!(
        tokens.get(start),
        None | Some(Token::OpenParenthesis) | Some(Token::Bar)
    ) {
        return start;
    }

    let mut argument = vec![];
    let end = consume_argument(tokens, start, &mut argument);
    if argument.is_empty() {
        return start;
    }
    output.push(Token::OpenParenthesis);
    output.append(&mut argument);
    output.push(Token::CloseParenthesis);
    end
}

/// Greedily collects the tightly bound components of a bare argument: numbers, constants,
/// postfix operators, `^` with its exponent, and nested prefix operators.
fn consume_argument(tokens: &[Token], start: usize, argument: &mut Vec<Token>) -> usize {
    let mut index = consume_sign(tokens, start, argument);
    while let Some(token) = tokens.get(index) {
        match token {
            Token::Literal(_) | Token::Constant(_) => {
                argument.push(token.clone());
                index += 1;
            }
            Token::Operator(Operator::Exponentiate) => {
                argument.push(token.clone());
                index = consume_sign(tokens, index + 1, argument);
                if let Some(Token::OpenParenthesis) = tokens.get(index) {
                    index = copy_group(tokens, index, argument);
                }
            }
            token if token.is_postfix_operator() && !argument.is_empty() => {
                argument.push(token.clone());
                index += 1;
            }
            token if token.is_prefix_operator() => {
                index = match tokens.get(index + 1) {
                    Some(Token::OpenParenthesis) => {
                        argument.push(token.clone());
                        copy_group(tokens, index + 1, argument)
                    }
                    Some(Token::Bar) => {
                        argument.push(token.clone());
                        copy_bar_group(tokens, index + 1, argument)
                    }
                    _ => emit_prefix(tokens, index, argument),
                };
            }
            _ => break,
        }
    }
    index
}

/// Consumes a `-` that directly precedes a number, constant or prefix operator.
fn consume_sign(tokens: &[Token], index: usize, argument: &mut Vec<Token>) -> usize {
    match (tokens.get(index), tokens.get(index + 1)) {
        (Some(sign), Some(next))
            if sign.is_minus() && (next.is_value() || next.is_prefix_operator()) =>
        {
            argument.push(sign.clone());
            index + 1
        }
        _ => index,
    }
}

/// Copies the parenthesized group opening at `index`, returning the index after it.
/// Bare function arguments inside the group are parenthesized on the way.
fn copy_group(tokens: &[Token], index: usize, argument: &mut Vec<Token>) -> usize {
    let mut depth = 0usize;
    let mut index = index;
    while let Some(token) = tokens.get(index) {
        if token.is_prefix_operator() {
            index = emit_prefix(tokens, index, argument);
            continue;
        }
        argument.push(token.clone());
        index += 1;
        match token {
            Token::OpenParenthesis => depth += 1,
            Token::CloseParenthesis => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    index
}

/// Copies the bar group opening at `index` up to the next bar, returning the index after it.
fn copy_bar_group(tokens: &[Token], index: usize, argument: &mut Vec<Token>) -> usize {
    argument.extend(tokens.get(index).cloned());
    let mut index = index + 1;
    while let Some(token) = tokens.get(index) {
        if token.is_prefix_operator() {
            index = emit_prefix(tokens, index, argument);
            continue;
        }
        argument.push(token.clone());
        index += 1;
        if *token == Token::Bar {
            break;
        }
    }
    index
}

/// Appends the `)` missing at the end or prepends the `(` missing at the start.
pub(crate) fn balance_parentheses(tokens: Vec<Token>) -> Vec<Token> {
    let opened = tokens
        .iter()
        .filter(|token| **token == Token::OpenParenthesis)
        .count();
    let closed = tokens
        .iter()
        .filter(|token| **token == Token::CloseParenthesis)
        .count();

    if opened > closed {
        let mut balanced = tokens;
        balanced.extend(std::iter::repeat(Token::CloseParenthesis).take(opened - closed));
        balanced
    } else {
        std::iter::repeat(Token::OpenParenthesis)
            .take(closed - opened)
            .chain(tokens)
            .collect()
    }
}

/// Decides from the preceding token whether each `-` negates and whether each `|` opens or
/// closes an absolute value group.
pub(crate) fn disambiguate_signs_and_bars(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let expects_operand = output.last().map_or(true, Token::expects_operand);
        let token = match token {
            Token::Operator(Operator::Subtract) if expects_operand => {
                Token::Operator(Operator::Negate)
            }
            Token::Bar if expects_operand => Token::OpenBar,
            Token::Bar => Token::CloseBar,
            token => token,
        };
        output.push(token);
    }
    output
}

/// Inserts `i×` between two adjacent factors, e.g. `2π` or `(1+2)(3+4)`.
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(previous) = output.last() {
            if previous.completes_factor() && token.begins_factor() {
                output.push(Token::Operator(Operator::ImplicitMultiply));
            }
        }
        output.push(token);
    }
    output
}
