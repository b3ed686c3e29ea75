use thiserror::Error;

/// The expression is malformed: grouping symbols don't match, an operator lacks operands,
/// or a token is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("mismatched absolute value bars")]
    MismatchedBars,
    #[error("operator '{operator}' needs {arity} operand(s)")]
    MissingOperand { operator: String, arity: usize },
    #[error("unknown token in expression: {0}")]
    UnknownToken(String),
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("malformed number: {0}")]
    MalformedNumber(String),
    #[error("the expression is invalid or incomplete")]
    Incomplete,
}

/// The expression is well-formed but one of its operations has no defined result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("factorial is only defined for non-negative integers up to {limit}, got {operand}")]
    InvalidFactorial { operand: String, limit: u32 },
    #[error("{function} is undefined for {operand}")]
    Domain {
        function: &'static str,
        operand: String,
    },
    #[error("result exceeds the supported magnitude")]
    Overflow,
}

/// Coarse classification of an [`EvaluationError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Arithmetic,
}

/// Why an evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl EvaluationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::Syntax(_) => ErrorKind::Syntax,
            EvaluationError::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }

    /// Recovers the typed error from an [`anyhow::Error`] raised somewhere in the pipeline.
    pub(crate) fn from_anyhow(error: anyhow::Error) -> Self {
        let error = match error.downcast::<EvaluationError>() {
            Ok(evaluation_error) => return evaluation_error,
            Err(error) => error,
        };
        let error = match error.downcast::<SyntaxError>() {
            Ok(syntax_error) => return EvaluationError::Syntax(syntax_error),
            Err(error) => error,
        };
        match error.downcast::<ArithmeticError>() {
            Ok(arithmetic_error) => EvaluationError::Arithmetic(arithmetic_error),
            Err(other) => EvaluationError::Syntax(SyntaxError::UnknownToken(other.to_string())),
        }
    }
}
