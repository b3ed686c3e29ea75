use crate::interpreter::config::Mode;
use crate::interpreter::error::SyntaxError;
use crate::interpreter::operator::{Associativity, Fixity, Operator};
use crate::interpreter::token::Token;
use anyhow::{bail, Context, Result};
use std::collections::VecDeque;

pub(crate) fn infix_to_postfix(original_tokens: Vec<Token>, mode: Mode) -> Result<Vec<Token>> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    while let Some(token) = tokens.pop_front() {
        match token {
            Token::Literal(_) | Token::Constant(_) | Token::Unknown(_) => output.push(token),
            Token::OpenParenthesis | Token::OpenBar => operators.push_front(token),
            Token::Operator(operator) => match operator.fixity() {
                Fixity::Prefix => operators.push_front(token),
                Fixity::Postfix => output.push(token),
                Fixity::Infix => parse_operator_token(&mut operators, &mut output, operator)?,
            },
            Token::CloseParenthesis => {
                parse_closing_token(&mut operators, &mut output, Token::OpenParenthesis)?
            }
            Token::CloseBar => {
                parse_closing_token(&mut operators, &mut output, Token::OpenBar)?;
                output.push(Token::Operator(Operator::AbsoluteValue));
                transfer_pending_prefix_operator(&mut operators, &mut output);
            }
            // Bars are resolved into opening and closing bars during preprocessing.
            Token::Bar => bail!(SyntaxError::MismatchedBars),
        };
    }

    transfer_leftover_operators(&mut operators, &mut output, mode)?;

    Ok(output)
}

fn mismatched(opening: &Token) -> SyntaxError {
    match opening {
        Token::OpenBar => SyntaxError::MismatchedBars,
        _ => SyntaxError::MismatchedParentheses,
    }
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    mode: Mode,
) -> Result<()> {
    while let Some(operator) = operators.pop_front() {
        match (operator, mode) {
            (opening @ (Token::OpenParenthesis | Token::OpenBar), Mode::Strict) => {
                bail!(mismatched(&opening));
            }
            // An unclosed group simply extends to the end of the expression.
            (Token::OpenParenthesis, Mode::Lenient) => {}
            (Token::OpenBar, Mode::Lenient) => {
                output.push(Token::Operator(Operator::AbsoluteValue))
            }
            (operator, _) => output.push(operator),
        }
    }
    Ok(())
}

/// Pops operators to the output until `opening` is found and discards it.
/// An opener of the other kind in between means the groups overlap.
fn parse_closing_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    opening: Token,
) -> Result<()> {
    loop {
        match operators.front() {
            None => {
                bail!(mismatched(&opening));
            }
            Some(top_of_operator_stack) => {
                if opening.eq(top_of_operator_stack) {
                    break;
                }
                if matches!(
                    top_of_operator_stack,
                    Token::OpenParenthesis | Token::OpenBar
                ) {
                    bail!(mismatched(&opening));
                }
                let operator = operators
                    .pop_front()
                    .with_context(|| "No operators left.")?;
                output.push(operator);
            }
        }
    }
    // Discard the opening token.
    operators.pop_front();
    if opening == Token::OpenParenthesis {
        transfer_pending_prefix_operator(operators, output);
    }
    Ok(())
}

/// A prefix operator waiting directly below a closed group applies to that group.
fn transfer_pending_prefix_operator(operators: &mut VecDeque<Token>, output: &mut Vec<Token>) {
    if operators
        .front()
        .map_or(false, |top_of_operator_stack| top_of_operator_stack.is_prefix_operator())
    {
        output.extend(operators.pop_front());
    }
}

fn parse_operator_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    operator: Operator,
) -> Result<()> {
    loop {
        match operators.front() {
            None => {
                break;
            }
            Some(top_of_operator_stack) => {
                let other_operator = match top_of_operator_stack {
                    Token::Operator(other_operator) => other_operator,
                    // An opening parenthesis or bar.
                    _ => break,
                };
                let pops_first = other_operator.precedence_gt(&operator)
                    || (other_operator.precedence_eq(&operator)
                        && operator.associativity() == Associativity::Left);
                if !pops_first {
                    break;
                }

                let other_operator_token = operators
                    .pop_front()
                    .with_context(|| "No operators left.")?; // Pop other_operator
                output.push(other_operator_token); // Push other_operator
            }
        }
    }

    operators.push_front(Token::Operator(operator)); // Push operator
    Ok(())
}
