use crate::interpreter::decimal::Decimal;
use crate::interpreter::error::SyntaxError;
use crate::interpreter::operator::Operator;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A named mathematical constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Pi => write!(f, "π"),
            Constant::E => write!(f, "e"),
        }
    }
}

impl str::FromStr for Constant {
    type Err = SyntaxError;

    fn from_str(input: &str) -> Result<Constant, Self::Err> {
        match input {
            "π" | "pi" => Ok(Constant::Pi),
            "e" => Ok(Constant::E),
            _ => Err(SyntaxError::UnknownToken(input.to_string())),
        }
    }
}

/// A discrete part of an expression
#[derive(Clone, PartialEq)]
pub enum Token {
    Literal(Decimal),
    Constant(Constant),
    Operator(Operator),
    OpenParenthesis,
    CloseParenthesis,
    /// An absolute value bar whose role has not been decided yet.
    Bar,
    OpenBar,
    CloseBar,
    Unknown(String),
}

impl Token {
    /// Classifies a token string. Never fails: text outside the vocabulary becomes
    /// [`Token::Unknown`] and is reported once the expression is evaluated.
    pub fn classify(text: &str) -> Token {
        match text {
            "(" => Token::OpenParenthesis,
            ")" => Token::CloseParenthesis,
            "|" => Token::Bar,
            _ => {
                if let Ok(operator) = text.parse() {
                    Token::Operator(operator)
                } else if let Ok(constant) = text.parse() {
                    Token::Constant(constant)
                } else if let Ok(value) = text.parse() {
                    Token::Literal(value)
                } else {
                    Token::Unknown(text.to_string())
                }
            }
        }
    }

    /// A 'value' is a token that directly represents a number, i.e. a literal or a constant.
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::Constant(_))
    }

    pub fn is_prefix_operator(&self) -> bool {
        matches!(self, Token::Operator(operator) if operator.is_prefix())
    }

    pub fn is_postfix_operator(&self) -> bool {
        matches!(self, Token::Operator(operator) if operator.is_postfix())
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(self, Token::Operator(operator) if operator.is_binary())
    }

    pub fn is_minus(&self) -> bool {
        matches!(self, Token::Operator(Operator::Subtract))
    }

    /// Whether an expression can end with this token, e.g. `2`, `π`, `)` or `!`.
    pub(crate) fn completes_factor(&self) -> bool {
        self.is_value()
            || self.is_postfix_operator()
            || matches!(self, Token::CloseParenthesis | Token::CloseBar)
    }

    /// Whether a factor can start with this token, e.g. `2`, `π`, `sin` or `(`.
    pub(crate) fn begins_factor(&self) -> bool {
        self.is_value()
            || self.is_prefix_operator()
            || matches!(self, Token::OpenParenthesis | Token::OpenBar)
    }

    /// Whether the next token has to be the start of an operand.
    pub(crate) fn expects_operand(&self) -> bool {
        self.is_binary_operator()
            || self.is_prefix_operator()
            || matches!(self, Token::OpenParenthesis | Token::OpenBar)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::Constant(constant) => write!(f, "{}", constant),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::OpenParenthesis => write!(f, "("),
            Token::CloseParenthesis => write!(f, ")"),
            Token::Bar | Token::OpenBar | Token::CloseBar => write!(f, "|"),
            Token::Unknown(text) => write!(f, "{}", text),
        }
    }
}

impl str::FromStr for Token {
    type Err = SyntaxError;

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        match Token::classify(input) {
            Token::Unknown(text) => Err(SyntaxError::UnknownToken(text)),
            token => Ok(token),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenBar => write!(f, "|<"),
            Token::CloseBar => write!(f, ">|"),
            Token::Operator(Operator::Negate) => write!(f, "neg"),
            token => write!(f, "{}", token),
        }
    }
}
