use crate::interpreter::error::SyntaxError;
use anyhow::{bail, Result};

/// Multi-character names with the token they stand for, longest first so that
/// `asinh` wins over `asin` and `asin` over `sin`.
static NAMES: [(&str, &str); 22] = [
    ("asinh", "asinh"),
    ("acosh", "acosh"),
    ("atanh", "atanh"),
    ("rad→°", "rad→°"),
    ("rad>°", "rad→°"),
    ("asin", "asin"),
    ("acos", "acos"),
    ("atan", "atan"),
    ("sinh", "sinh"),
    ("cosh", "cosh"),
    ("tanh", "tanh"),
    ("sqrt", "√"),
    ("cbrt", "∛"),
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("log", "lg"),
    ("ln", "ln"),
    ("lg", "lg"),
    ("pi", "π"),
    ("e", "e"),
    ("π", "π"),
];

static SYMBOLS: [char; 14] = [
    '+', '-', '×', '÷', '^', '(', ')', '|', '!', '°', '√', '∛', '*', '/',
];

/// Splits a raw expression into token strings.
///
/// Whitespace separates tokens but is otherwise ignored. Only the vocabulary is recognized
/// here; deciding whether `-` negates or `|` opens a group is left to the preprocessor.
///
/// # Examples
///
/// ```
/// use scientific_evaluator::interpreter::lexer::tokenize;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("2sin 30° * pi")?;
/// assert_eq!(tokens, ["2", "sin", "30", "°", "×", "π"]);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<String>> {
    let mut tokens = vec![];
    let mut rest = expression;
    let mut position = 0;

    while let Some(character) = rest.chars().next() {
        let length = if character.is_whitespace() {
            character.len_utf8()
        } else if character.is_ascii_digit() || character == '.' {
            let number = read_number(rest)?;
            tokens.push(number.to_string());
            number.len()
        } else if let Some((name, canonical)) = NAMES.iter().find(|(name, _)| rest.starts_with(name)) {
            tokens.push(canonical.to_string());
            name.len()
        } else if SYMBOLS.contains(&character) {
            tokens.push(canonical_symbol(character).to_string());
            character.len_utf8()
        } else {
            bail!(SyntaxError::UnexpectedCharacter {
                character,
                position
            });
        };
        position += rest[..length].chars().count();
        rest = &rest[length..];
    }

    Ok(tokens)
}

fn read_number(text: &str) -> Result<&str> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let number = &text[..end];
    if number == "." || number.matches('.').count() > 1 {
        bail!(SyntaxError::MalformedNumber(number.to_string()));
    }
    Ok(number)
}

fn canonical_symbol(symbol: char) -> char {
    match symbol {
        '*' => '×',
        '/' => '÷',
        other => other,
    }
}
