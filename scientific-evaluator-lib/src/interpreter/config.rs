use crate::interpreter::decimal::Context;

/// How forgiving the parser is about unbalanced grouping symbols.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Missing parentheses are inserted, a leftover `(` is dropped and an unclosed
    /// absolute value bar is closed at the end of the expression.
    #[default]
    Lenient,
    /// Every opening parenthesis and bar must be closed.
    Strict,
}

/// Settings fixed for the lifetime of an evaluator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Significant digits of every intermediate and final result.
    pub precision: u64,
    /// Largest operand accepted by `!`.
    pub factorial_limit: u32,
    pub strict: bool,
}

impl Config {
    pub const DEFAULT_PRECISION: u64 = 34;
    pub const DEFAULT_FACTORIAL_LIMIT: u32 = 4000;

    pub fn context(&self) -> Context {
        Context::new(self.precision)
    }

    pub fn mode(&self) -> Mode {
        if self.strict {
            Mode::Strict
        } else {
            Mode::Lenient
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            precision: Config::DEFAULT_PRECISION,
            factorial_limit: Config::DEFAULT_FACTORIAL_LIMIT,
            strict: false,
        }
    }
}
