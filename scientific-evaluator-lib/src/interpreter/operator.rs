use crate::interpreter::decimal::{math, Context, Decimal};
use crate::interpreter::error::SyntaxError;
use anyhow::{bail, Result};
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A mathematical operator, either binary or unary (prefix or postfix).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Multiplication inferred from two adjacent factors, binding tighter than `×`.
    ImplicitMultiply,
    Exponentiate,
    Negate,
    SquareRoot,
    CubeRoot,
    CommonLogarithm,
    NaturalLogarithm,
    Sine,
    Cosine,
    Tangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    HyperbolicSine,
    HyperbolicCosine,
    HyperbolicTangent,
    InverseHyperbolicSine,
    InverseHyperbolicCosine,
    InverseHyperbolicTangent,
    Factorial,
    DegreesToRadians,
    RadiansToDegrees,
    /// Emitted when an absolute value bar group closes; never parsed from input.
    AbsoluteValue,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Where an operator stands relative to its operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

/// How an operator takes part in parsing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OperatorInfo {
    pub precedence: u8,
    pub associativity: Associativity,
    pub arity: usize,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract | Operator::Negate => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::ImplicitMultiply => "i×",
            Operator::Exponentiate => "^",
            Operator::SquareRoot => "√",
            Operator::CubeRoot => "∛",
            Operator::CommonLogarithm => "lg",
            Operator::NaturalLogarithm => "ln",
            Operator::Sine => "sin",
            Operator::Cosine => "cos",
            Operator::Tangent => "tan",
            Operator::ArcSine => "asin",
            Operator::ArcCosine => "acos",
            Operator::ArcTangent => "atan",
            Operator::HyperbolicSine => "sinh",
            Operator::HyperbolicCosine => "cosh",
            Operator::HyperbolicTangent => "tanh",
            Operator::InverseHyperbolicSine => "asinh",
            Operator::InverseHyperbolicCosine => "acosh",
            Operator::InverseHyperbolicTangent => "atanh",
            Operator::Factorial => "!",
            Operator::DegreesToRadians => "°",
            Operator::RadiansToDegrees => "rad→°",
            Operator::AbsoluteValue => "abs",
        }
    }

    pub fn fixity(&self) -> Fixity {
        match self {
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::ImplicitMultiply
            | Operator::Exponentiate => Fixity::Infix,
            Operator::Factorial
            | Operator::DegreesToRadians
            | Operator::RadiansToDegrees
            | Operator::AbsoluteValue => Fixity::Postfix,
            _ => Fixity::Prefix,
        }
    }

    pub fn info(&self) -> OperatorInfo {
        let (precedence, associativity) = match self {
            Operator::Add | Operator::Subtract => (2, Associativity::Left),
            Operator::Multiply | Operator::Divide => (3, Associativity::Left),
            Operator::ImplicitMultiply => (8, Associativity::Left),
            Operator::Exponentiate => (9, Associativity::Right),
            _ if self.is_postfix() => (7, Associativity::Left),
            _ => (6, Associativity::Right),
        };
        let arity = if self.is_binary() { 2 } else { 1 };
        OperatorInfo {
            precedence,
            associativity,
            arity,
        }
    }

    pub fn precedence(&self) -> u8 {
        self.info().precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.info().associativity
    }

    pub fn arity(&self) -> usize {
        self.info().arity
    }

    pub fn is_binary(&self) -> bool {
        self.fixity() == Fixity::Infix
    }

    pub fn is_prefix(&self) -> bool {
        self.fixity() == Fixity::Prefix
    }

    pub fn is_postfix(&self) -> bool {
        self.fixity() == Fixity::Postfix
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    /// Applies the operator to its operands, leftmost first.
    pub(crate) fn apply(
        &self,
        operands: &[Decimal],
        context: Context,
        factorial_limit: u32,
    ) -> Result<Decimal> {
        let result = match (self, operands) {
            (Operator::Add, [x, y]) => x.add(y, context),
            (Operator::Subtract, [x, y]) => x.sub(y, context),
            (Operator::Multiply | Operator::ImplicitMultiply, [x, y]) => x.mul(y, context),
            (Operator::Divide, [x, y]) => x.div(y, context)?,
            (Operator::Exponentiate, [x, y]) => math::pow(x, y, context)?,
            (Operator::Negate, [x]) => -x,
            (Operator::SquareRoot, [x]) => math::sqrt(x, context)?,
            (Operator::CubeRoot, [x]) => math::cbrt(x, context)?,
            (Operator::CommonLogarithm, [x]) => math::log10(x, context)?,
            (Operator::NaturalLogarithm, [x]) => math::ln(x, context)?,
            (Operator::Sine, [x]) => math::sin(x, context)?,
            (Operator::Cosine, [x]) => math::cos(x, context)?,
            (Operator::Tangent, [x]) => math::tan(x, context)?,
            (Operator::ArcSine, [x]) => math::asin(x, context)?,
            (Operator::ArcCosine, [x]) => math::acos(x, context)?,
            (Operator::ArcTangent, [x]) => math::atan(x, context)?,
            (Operator::HyperbolicSine, [x]) => math::sinh(x, context)?,
            (Operator::HyperbolicCosine, [x]) => math::cosh(x, context)?,
            (Operator::HyperbolicTangent, [x]) => math::tanh(x, context)?,
            (Operator::InverseHyperbolicSine, [x]) => math::asinh(x, context)?,
            (Operator::InverseHyperbolicCosine, [x]) => math::acosh(x, context)?,
            (Operator::InverseHyperbolicTangent, [x]) => math::atanh(x, context)?,
            (Operator::Factorial, [x]) => math::factorial(x, factorial_limit, context)?,
            (Operator::DegreesToRadians, [x]) => math::to_radians(x, context),
            (Operator::RadiansToDegrees, [x]) => math::to_degrees(x, context),
            (Operator::AbsoluteValue, [x]) => x.abs(),
            (operator, _) => bail!(SyntaxError::MissingOperand {
                operator: operator.to_string(),
                arity: operator.arity(),
            }),
        };
        Ok(result.within_exponent_limit()?)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl str::FromStr for Operator {
    type Err = SyntaxError;

    /// Parses the symbol of an operator, including the ASCII spellings `*`, `/`, `sqrt`,
    /// `cbrt`, `log` and `rad>°`. A `-` always parses as subtraction; whether it negates
    /// is decided by its position in the expression.
    fn from_str(input: &str) -> Result<Operator, Self::Err> {
        let operator = match input {
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "×" | "*" => Operator::Multiply,
            "÷" | "/" => Operator::Divide,
            "i×" => Operator::ImplicitMultiply,
            "^" => Operator::Exponentiate,
            "√" | "sqrt" => Operator::SquareRoot,
            "∛" | "cbrt" => Operator::CubeRoot,
            "lg" | "log" => Operator::CommonLogarithm,
            "ln" => Operator::NaturalLogarithm,
            "sin" => Operator::Sine,
            "cos" => Operator::Cosine,
            "tan" => Operator::Tangent,
            "asin" => Operator::ArcSine,
            "acos" => Operator::ArcCosine,
            "atan" => Operator::ArcTangent,
            "sinh" => Operator::HyperbolicSine,
            "cosh" => Operator::HyperbolicCosine,
            "tanh" => Operator::HyperbolicTangent,
            "asinh" => Operator::InverseHyperbolicSine,
            "acosh" => Operator::InverseHyperbolicCosine,
            "atanh" => Operator::InverseHyperbolicTangent,
            "!" => Operator::Factorial,
            "°" => Operator::DegreesToRadians,
            "rad→°" | "rad>°" => Operator::RadiansToDegrees,
            _ => return Err(SyntaxError::UnknownToken(input.to_string())),
        };
        Ok(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn operator_equality_correspond_with_precedence() {
        let equal1 = Operator::Multiply;
        let equal2 = Operator::Divide;
        assert!(equal1.precedence_eq(&equal2))
    }

    #[test]
    fn operator_gt_correspond_with_precedence() {
        let greater = Operator::Multiply;
        let lesser = Operator::Add;
        assert!(greater.precedence_gt(&lesser))
    }

    #[test]
    fn precedence_bands_are_ordered() {
        let ordered = [
            Operator::Add,
            Operator::Multiply,
            Operator::Sine,
            Operator::Factorial,
            Operator::ImplicitMultiply,
            Operator::Exponentiate,
        ];

        for pair in ordered.windows(2) {
            assert!(pair[1].precedence_gt(&pair[0]), "{:?}", pair);
        }
    }

    #[parameterized(
    symbol = { "*", "/", "sqrt", "cbrt", "log", "rad>°" },
    expected = {
    Operator::Multiply,
    Operator::Divide,
    Operator::SquareRoot,
    Operator::CubeRoot,
    Operator::CommonLogarithm,
    Operator::RadiansToDegrees,
    }
    )]
    fn ascii_alias_parses_to_canonical_operator(symbol: &str, expected: Operator) {
        let operator: Operator = symbol.parse().unwrap();

        assert_eq!(operator, expected);
    }

    #[test]
    fn canonical_symbols_parse_back() {
        let operators = [
            Operator::Add,
            Operator::ImplicitMultiply,
            Operator::InverseHyperbolicTangent,
            Operator::RadiansToDegrees,
            Operator::CubeRoot,
        ];

        for operator in operators {
            assert_eq!(operator.symbol().parse::<Operator>().unwrap(), operator);
        }
    }

    #[test]
    fn absolute_value_is_not_parseable() {
        "abs".parse::<Operator>().expect_err("Should return Err");
    }

    #[test]
    fn arity_follows_fixity() {
        assert_eq!(Operator::Exponentiate.arity(), 2);
        assert_eq!(Operator::Negate.arity(), 1);
        assert_eq!(Operator::Factorial.arity(), 1);
        assert_eq!(Operator::Negate.associativity(), Associativity::Right);
        assert_eq!(Operator::Exponentiate.associativity(), Associativity::Right);
        assert_eq!(Operator::Subtract.associativity(), Associativity::Left);
    }

    #[test]
    fn applying_with_too_few_operands_is_an_error() {
        let result = Operator::Add.apply(&[Decimal::one()], Context::DECIMAL128, 4000);

        result.expect_err("Should return Err");
    }

    #[test]
    fn applying_factorial_respects_limit() {
        let operand: Decimal = "6".parse().unwrap();

        let within = Operator::Factorial.apply(&[operand.clone()], Context::DECIMAL128, 10);
        let beyond = Operator::Factorial.apply(&[operand], Context::DECIMAL128, 5);

        assert_eq!(within.unwrap(), "720".parse::<Decimal>().unwrap());
        beyond.expect_err("Should return Err");
    }
}
