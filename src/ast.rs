use crate::error::Error;
use crate::functions::{FuncDef, CONSTANTS, FUNCTIONS};
use crate::token::{Op, Token};

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A constant value
    Value(f64),
    /// <left> + <right>
    Add(Box<Ast>, Box<Ast>),
    /// <left> - <right>
    Sub(Box<Ast>, Box<Ast>),
    /// <left> * <right>
    Mul(Box<Ast>, Box<Ast>),
    /// <left> / <right>
    Div(Box<Ast>, Box<Ast>),
    /// <left> % <right>, floored modulo
    Rem(Box<Ast>, Box<Ast>),
    /// <left> ^ <right>
    Pow(Box<Ast>, Box<Ast>),
    /// -<inner>
    Neg(Box<Ast>),
    /// fn(<args>, ...)
    Function(FuncDef, Vec<Ast>),
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Value(v), Ast::Value(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Add(a, b), Ast::Add(a2, b2)) => a == a2 && b == b2,
            (Ast::Sub(a, b), Ast::Sub(a2, b2)) => a == a2 && b == b2,
            (Ast::Mul(a, b), Ast::Mul(a2, b2)) => a == a2 && b == b2,
            (Ast::Div(a, b), Ast::Div(a2, b2)) => a == a2 && b == b2,
            (Ast::Rem(a, b), Ast::Rem(a2, b2)) => a == a2 && b == b2,
            (Ast::Pow(a, b), Ast::Pow(a2, b2)) => a == a2 && b == b2,
            (Ast::Neg(a), Ast::Neg(a2)) => a == a2,
            (Ast::Function(f, args), Ast::Function(f2, args2)) => f == f2 && args == args2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    /// This function eats the tokens as it uses them.
    ///
    /// All static validation happens here, before anything is evaluated:
    /// unknown names, wrong argument counts and input that does not reduce
    /// to a single expression are syntax errors.
    pub fn from_tokens(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        let ast = Self::from_tokens_internal(tokens, context)?;
        if !tokens.is_empty() {
            return Err(Error::Syntax("unexpected trailing input".into()));
        }
        Ok(ast)
    }

    fn from_tokens_internal(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        if let Some(token) = tokens.pop() {
            match token {
                Token::Number(value) => Ok(Self::Value(value)),
                Token::Ident(name) => {
                    if let Some(&value) = CONSTANTS.get(name.as_str()) {
                        Ok(Self::Value(value))
                    } else {
                        Err(Error::Syntax(format!("unknown name '{}'", name)))
                    }
                }
                Token::Func(name, args) => {
                    let def = match FUNCTIONS.get(name.as_str()) {
                        Some(&def) => def,
                        None => panic!(
                            "Internal bug: unregistered function '{}' after shunting yard",
                            name
                        ),
                    };
                    if args < def.min_args || args > def.max_args {
                        return Err(Error::Syntax(arity_message(&def, args)));
                    }
                    let mut parsed = Vec::with_capacity(args);
                    for _ in 0..args {
                        parsed.push(Self::from_tokens_internal(tokens, " in function call")?);
                    }
                    // arguments come off the stack right to left
                    parsed.reverse();
                    Ok(Self::Function(def, parsed))
                }
                Token::Op(Op::Neg) => {
                    let inner = Self::from_tokens_internal(tokens, " after unary minus")?;
                    Ok(Self::Neg(Box::new(inner)))
                }
                Token::Op(op) => {
                    let right = Box::new(Self::from_tokens_internal(tokens, " after operator")?);
                    let left = Box::new(Self::from_tokens_internal(tokens, " before operator")?);
                    match op {
                        Op::Plus => Ok(Self::Add(left, right)),
                        Op::Minus => Ok(Self::Sub(left, right)),
                        Op::Mul => Ok(Self::Mul(left, right)),
                        Op::Div => Ok(Self::Div(left, right)),
                        Op::Rem => Ok(Self::Rem(left, right)),
                        Op::Pow => Ok(Self::Pow(left, right)),
                        Op::Neg => unreachable!("handled above"),
                    }
                }
                other => panic!("Internal error: got {:?} token after shunting yard", other),
            }
        } else {
            Err(Error::Syntax(format!("empty expression{}", context)))
        }
    }
}

fn arity_message(def: &FuncDef, got: usize) -> String {
    if def.min_args == def.max_args {
        format!(
            "{} expects {} argument{}, got {}",
            def.name,
            def.min_args,
            if def.min_args == 1 { "" } else { "s" },
            got
        )
    } else {
        format!(
            "{} expects {} to {} arguments, got {}",
            def.name, def.min_args, def.max_args, got
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Ast;
    use crate::error::Error;
    use crate::lexer::Lexer;
    use test_case::test_case;

    fn parse(input: &str) -> Result<Ast, Error> {
        Ast::from_tokens(&mut Lexer::new(input).parse()?, "")
    }

    #[test]
    fn constants_become_values() {
        assert_eq!(parse("pi"), Ok(Ast::Value(std::f64::consts::PI)));
        assert_eq!(parse("π"), Ok(Ast::Value(std::f64::consts::PI)));
        assert_eq!(parse("e"), Ok(Ast::Value(std::f64::consts::E)));
    }

    #[test]
    fn shapes() {
        let expected = Ast::Add(
            Box::new(Ast::Value(3.0)),
            Box::new(Ast::Mul(Box::new(Ast::Value(5.0)), Box::new(Ast::Value(2.0)))),
        );
        assert_eq!(parse("3 + 5 * 2"), Ok(expected));

        let expected = Ast::Neg(Box::new(Ast::Pow(
            Box::new(Ast::Value(2.0)),
            Box::new(Ast::Value(2.0)),
        )));
        assert_eq!(parse("-2^2"), Ok(expected));
    }

    #[test_case("bar" ; "unknown constant")]
    #[test_case("foo(2)" ; "unknown function")]
    #[test_case("sin()" ; "missing argument")]
    #[test_case("sin(1, 2)" ; "too many arguments")]
    #[test_case("log(1, 2, 3)" ; "above maximum arity")]
    #[test_case("pow(2)" ; "below minimum arity")]
    #[test_case("2+" ; "dangling operator")]
    #[test_case("" ; "empty input")]
    #[test_case("2 3" ; "two expressions")]
    #[test_case("2(3)" ; "no implicit multiplication")]
    fn rejects(input: &str) {
        let result = parse(input);
        assert!(
            matches!(result, Err(Error::Syntax(_))),
            "input {:?} gave {:?}",
            input,
            result
        );
    }

    #[test]
    fn variable_arity() {
        assert!(parse("log(100)").is_ok());
        assert!(parse("log(8, 2)").is_ok());
        assert!(parse("root(16)").is_ok());
        assert!(parse("root(27, 3)").is_ok());
    }
}
