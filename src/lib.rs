#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal
)]

//! Scieval, the evaluation core of a desktop scientific calculator.
//!
//! The GUI front end accumulates button presses and keystrokes into a
//! string, hands it to [`evaluate`](fn.evaluate.html) together with the
//! current angle mode, and displays the returned number or the error
//! message:
//!
//! ```
//! use scieval::{evaluate, AngleMode};
//!
//! assert_eq!(evaluate("2+2", AngleMode::Radians), Ok(4.0));
//! assert_eq!(evaluate("2^3", AngleMode::Radians), Ok(8.0));
//! assert!(evaluate("1/0", AngleMode::Radians).is_err());
//! ```
//!
//! Parsing can be separated from evaluation with the
//! [`Expr`](struct.Expr.html) type. This is how a DEG/RAD toggle
//! re-evaluates the expression on the display without re-parsing it:
//!
//! ```
//! use scieval::{AngleMode, Expr};
//!
//! let expr = Expr::parse("sin(90)").unwrap();
//! assert!((expr.eval(AngleMode::Degrees).unwrap() - 1.0).abs() < 1e-12);
//! assert!(expr.eval(AngleMode::Radians).unwrap() < 0.9);
//! ```
//!
//! Results meant for the display go through
//! [`format_value`](fn.format_value.html), which renders integer-valued
//! results without a decimal point and trims everything else to 12
//! significant digits.
//!
//! # Language definition
//!
//! The language implemented by scieval can contain the following elements:
//!
//! - float literal values: `12`, `3.5`, `.5`, `1e-3`;
//! - left and right parenthesis, and `,` between function arguments;
//! - mathematical operators: `+` for addition, `-` for subtraction and
//!   negation, `*` for multiplication, `/` for division, `%` for floored
//!   modulo and `^` for exponentiation. `×`, `÷` and `**` are accepted
//!   aliases for `*`, `/` and `^`;
//! - constants: `pi` (also `π`) and `e`;
//! - function calls: `sin(90)`, `log(8, 2)`. The following functions are
//!   registered: `sin`, `cos`, `tan` (interpreted per the angle mode),
//!   `sqrt` (also `√`), `root(x)`/`root(x, n)`, `ln`, `log(x)`/
//!   `log(x, base)`, `log10`, `exp`, `abs`, `round`, `pow(x, y)`,
//!   `fact(n)`, `npr(n, r)` and `ncr(n, r)`.
//!
//! Identifiers are matched case-insensitively. Any other symbol is
//! forbidden in the input, and malformed input is reported as an error
//! value, never a panic.
//!
//! Evaluation returns `Result<f64, Error>` with three error kinds:
//! [`Error::Syntax`](enum.Error.html) for input that does not parse
//! (including unknown names and wrong argument counts, both rejected at
//! parse time), `Error::DivisionByZero` for `/` and `%` with a zero right
//! operand, and `Error::Domain` for arguments outside a function's domain
//! or results outside the representable range.
//!
//! # Technical details
//!
//! scieval is based on an AST interpreter, and uses a simple
//! shunting-yard algorithm for parsing the expressions. It works only
//! with `f64` data. The angle mode is passed into every call rather than
//! stored, so evaluation is stateless and deterministic.

#[macro_use]
extern crate lazy_static;

mod angle;
mod ast;
mod error;
mod expr;
mod format;
mod functions;
mod lexer;
mod token;

pub use crate::angle::AngleMode;
pub use crate::ast::Ast;
pub use crate::error::Error;
pub use crate::expr::{evaluate, Expr};
pub use crate::format::format_value;
pub use crate::functions::{Apply, FuncDef, CONSTANTS, FUNCTIONS};
