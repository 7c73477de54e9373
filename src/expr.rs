use tracing::{debug, trace};

use crate::angle::AngleMode;
use crate::ast::Ast;
use crate::error::Error;
use crate::lexer::Lexer;

/// Evaluate a single expression from `input` under the given angle `mode`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed. The function is pure: the
/// same `(input, mode)` pair always produces the same result, and nothing
/// is mutated anywhere.
///
/// # Example
///
/// ```
/// use scieval::{evaluate, AngleMode};
///
/// assert_eq!(evaluate("45 - 2^3", AngleMode::Radians), Ok(37.0));
/// assert_eq!(evaluate("sqrt(16)", AngleMode::Radians), Ok(4.0));
/// assert!(evaluate("1/0", AngleMode::Radians).is_err());
/// ```
pub fn evaluate(input: &str, mode: AngleMode) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval(mode))
}

/// A parsed mathematical expression.
///
/// Parsing once and evaluating many times is how the UI implements its
/// DEG/RAD toggle: the same `Expr` is re-evaluated under the new mode.
///
/// # Examples
/// ```
/// use scieval::{AngleMode, Expr};
///
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(AngleMode::Radians), Ok(13.0));
///
/// let expr = Expr::parse("sin(90)").unwrap();
/// assert!((expr.eval(AngleMode::Degrees).unwrap() - 1.0).abs() < 1e-12);
/// assert!(expr.eval(AngleMode::Radians).unwrap() < 0.9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// Everything that can be rejected without evaluating is rejected
    /// here: syntax errors, unknown names and wrong argument counts.
    ///
    /// # Examples
    /// ```
    /// use scieval::Expr;
    ///
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3 + * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(expression);
        let mut tokens = lexer.parse()?;
        trace!("expression {:?} lexed to {:?}", expression, tokens);

        let ast = Ast::from_tokens(&mut tokens, "")?;
        debug!("parsed expression {:?}", expression);
        Ok(Self { ast })
    }

    /// Evaluate the expression under the given angle `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scieval::{AngleMode, Expr};
    ///
    /// let expr = Expr::parse("cos(0)").unwrap();
    /// assert_eq!(expr.eval(AngleMode::Degrees), Ok(1.0));
    /// assert_eq!(expr.eval(AngleMode::Radians), Ok(1.0));
    /// ```
    pub fn eval(&self, mode: AngleMode) -> Result<f64, Error> {
        let value = Self::inner_eval(&self.ast, mode)?;
        if !value.is_finite() {
            // a bare `inf` or `NaN` on the display helps nobody; powers
            // outside the real domain and overflows land here
            trace!("refusing non-finite result {}", value);
            let message = if value.is_nan() {
                "result is not a number"
            } else {
                "result is too large"
            };
            return Err(Error::Domain(message.into()));
        }
        Ok(value)
    }

    /// Access the expression's AST.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_eval(ast: &Ast, mode: AngleMode) -> Result<f64, Error> {
        match *ast {
            Ast::Value(number) => Ok(number),
            Ast::Add(ref left, ref right) => {
                Ok(Self::inner_eval(left, mode)? + Self::inner_eval(right, mode)?)
            }
            Ast::Sub(ref left, ref right) => {
                Ok(Self::inner_eval(left, mode)? - Self::inner_eval(right, mode)?)
            }
            Ast::Mul(ref left, ref right) => {
                Ok(Self::inner_eval(left, mode)? * Self::inner_eval(right, mode)?)
            }
            Ast::Div(ref left, ref right) => {
                let divisor = Self::inner_eval(right, mode)?;
                if divisor == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(Self::inner_eval(left, mode)? / divisor)
            }
            Ast::Rem(ref left, ref right) => {
                let divisor = Self::inner_eval(right, mode)?;
                if divisor == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                let value = Self::inner_eval(left, mode)?;
                // floored modulo: the result takes the divisor's sign
                Ok(value - divisor * (value / divisor).floor())
            }
            Ast::Pow(ref left, ref right) => {
                Ok(Self::inner_eval(left, mode)?.powf(Self::inner_eval(right, mode)?))
            }
            Ast::Neg(ref inner) => Ok(-Self::inner_eval(inner, mode)?),
            Ast::Function(ref def, ref args) => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(Self::inner_eval(arg, mode)?);
                }
                (def.apply)(&values, mode)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, Expr};
    use crate::angle::AngleMode;
    use crate::error::Error;

    const RAD: AngleMode = AngleMode::Radians;
    const DEG: AngleMode = AngleMode::Degrees;

    #[test]
    fn parse() {
        let valid_expressions = [
            "3 + +5e67",
            "(3 + -5)*45",
            "(3. + 5.0)*\t\n45",
            "(3 + 5^5e-6)*45",
            "sin(34.0) ^ sqrt(28.0)",
            "log(8, 2) + root(27, 3)",
            "-(2 + 3)",
            "2 × 3 ÷ 4",
        ];
        for expr in &valid_expressions {
            assert!(Expr::parse(expr).is_ok(), "{:?}", expr);
        }
    }

    #[test]
    fn eval() {
        let eval_pairs = [
            ("3 + 5", 8.0),
            ("2 - 5", -3.0),
            ("2 * 5", 10.0),
            ("10 / 5", 2.0),
            ("2 ^ 3", 8.0),
            ("2 ** 3", 8.0),
            ("2+2", 4.0),
            ("-3", -3.0),
            ("25 + -3", 22.0),
            ("25 - -3", 28.0),
            ("-(2 + 3)", -5.0),
            ("-pi + pi", 0.0),
            ("2^-2", 0.25),
            ("-2^2", -4.0),
            ("3 + 5 * 2", 13.0),
            ("(3 + 5) * 2", 16.0),
            ("5 % 3", 2.0),
            ("-5 % 3", 1.0),
            ("5 % -3", -1.0),
            ("sqrt(16)", 4.0),
            ("abs(-3.5)", 3.5),
            ("fact(5)", 120.0),
            ("npr(5, 2)", 20.0),
            ("ncr(5, 2)", 10.0),
            ("pow(2, 10)", 1024.0),
            ("pi", std::f64::consts::PI),
            ("e", std::f64::consts::E),
            ("2 × 3", 6.0),
            ("10 ÷ 4", 2.5),
        ];
        for (input, expected) in &eval_pairs {
            assert_eq!(evaluate(input, RAD), Ok(*expected), "input {:?}", input);
        }
    }

    fn assert_close(input: &str, mode: AngleMode, expected: f64) {
        let value = evaluate(input, mode).unwrap_or_else(|e| panic!("{:?}: {}", input, e));
        assert!(
            (value - expected).abs() < 1e-12,
            "input {:?} gave {}, expected {}",
            input,
            value,
            expected
        );
    }

    #[test]
    fn scientific() {
        assert_close("sin(90)", DEG, 1.0);
        assert_close("sin(30)", DEG, 0.5);
        assert_close("cos(180)", DEG, -1.0);
        assert_close("tan(45)", DEG, 1.0);
        assert_close("sin(pi/2)", RAD, 1.0);
        assert_close("root(27, 3)", RAD, 3.0);
        assert_close("root(-27, 3)", RAD, -3.0);
        assert_close("log(8, 2)", RAD, 3.0);
        assert_close("log(100)", RAD, 2.0);
        assert_close("log10(1000)", RAD, 3.0);
        assert_close("ln(e)", RAD, 1.0);
        assert_close("exp(2)", RAD, std::f64::consts::E * std::f64::consts::E);
        assert_close("2 * pi", RAD, 2.0 * std::f64::consts::PI);
        assert_close("√(2) * √(2)", RAD, 2.0);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(evaluate("1/0", RAD), Err(Error::DivisionByZero));
        assert_eq!(evaluate("5 % 0", RAD), Err(Error::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)", RAD), Err(Error::DivisionByZero));
        assert_eq!(evaluate("0 / 0", RAD), Err(Error::DivisionByZero));
    }

    #[test]
    fn domain_errors() {
        let inputs = [
            "sqrt(-4)",
            "log(-1)",
            "ln(0)",
            "tan(90)",
            "fact(2.5)",
            "fact(-1)",
            "root(-16, 4)",
            "log(5, 1)",
            // powers outside the real domain and overflows are refused
            // instead of displaying NaN or infinity
            "(-8) ^ (1/3)",
            "2 ^ 10000",
            "-2 ^ 10000",
        ];
        for input in &inputs {
            let result = evaluate(input, DEG);
            assert!(
                matches!(result, Err(Error::Domain(_))),
                "input {:?} gave {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn syntax_errors() {
        let inputs = [
            "", "2+", "2 3", "sin()", "sin(1, 2)", "foo(2)", "bar", "(2", "2)", "2,3", "1 $ 1",
            "2 @ 2",
        ];
        for input in &inputs {
            let result = evaluate(input, RAD);
            assert!(
                matches!(result, Err(Error::Syntax(_))),
                "input {:?} gave {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn mode_sensitivity() {
        // 0 is invariant across modes
        assert_eq!(evaluate("cos(0)", DEG), evaluate("cos(0)", RAD));
        // 90 is not
        assert_ne!(evaluate("cos(90)", DEG), evaluate("cos(90)", RAD));

        // the mode only matters for trigonometry
        assert_eq!(evaluate("sqrt(16)", DEG), evaluate("sqrt(16)", RAD));
    }

    #[test]
    fn idempotence() {
        for input in &["2 + 2", "sin(45)", "tan(90)", "1/0", "2+"] {
            for mode in &[DEG, RAD] {
                assert_eq!(
                    evaluate(input, *mode),
                    evaluate(input, *mode),
                    "input {:?}",
                    input
                );
            }
        }
    }

    #[test]
    fn parsed_ast_is_accessible() {
        use crate::ast::Ast;

        let expr = Expr::parse("pi").unwrap();
        assert_eq!(expr.ast(), &Ast::Value(std::f64::consts::PI));
    }

    #[test]
    fn reuse_across_modes() {
        let expr = Expr::parse("cos(90)").unwrap();
        let degrees = expr.eval(DEG).unwrap();
        let radians = expr.eval(RAD).unwrap();
        assert!(degrees.abs() < 1e-12);
        assert_eq!(radians, f64::cos(90.0));
    }
}
