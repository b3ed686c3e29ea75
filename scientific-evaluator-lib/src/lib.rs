//! Evaluates calculator-style infix expressions to 34 significant decimal digits.
//!
//! Expressions are given either as a sequence of tokens, as produced by a calculator keypad,
//! or as raw text. Bare function arguments (`sin 45°`), implicit multiplication (`2π`) and
//! absolute value bars (`|-3|`) are all understood.
//!
//! ```
//! use scientific_evaluator::interpreter::evaluate_expression;
//!
//! let evaluation = evaluate_expression("2sin 30° + 1");
//! assert_eq!(evaluation.value().unwrap().to_string(), "2");
//! ```

pub mod interpreter;
