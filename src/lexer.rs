use crate::error::Error;
use crate::functions::FUNCTIONS;
use crate::token::{Op, Token};

/// An helper struct for lexing the input
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

/// Check whether a `+` or `-` found after `previous` is a sign rather than
/// a binary operator.
fn is_sign_position(previous: Option<&Token>) -> bool {
    match previous {
        None | Some(Token::Op(_)) | Some(Token::LParen) | Some(Token::Comma) => true,
        _ => false,
    }
}

impl Lexer {
    pub fn new(string: &str) -> Lexer {
        Lexer {
            input: string.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the input and reorder it into reverse polish notation with
    /// the shunting-yard algorithm. Function calls are emitted as
    /// [`Token::Func`] carrying the counted number of arguments, so arity
    /// can be checked when the AST is built.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators: Vec<Token> = Vec::new();
        // One entry per open parenthesis: the comma count when the
        // parenthesis belongs to a function call, `None` when it groups.
        let mut groups: Vec<Option<usize>> = Vec::new();
        let mut previous: Option<Token> = None;

        while let Some(token) = self.next_token()? {
            let token = if matches!(token, Token::Op(Op::Plus) | Token::Op(Op::Minus))
                && is_sign_position(previous.as_ref())
            {
                if token == Token::Op(Op::Plus) {
                    // a sign `+` changes nothing, drop it
                    continue;
                }
                Token::Op(Op::Neg)
            } else {
                token
            };

            match token {
                Token::Number(_) => output.push(token.clone()),
                Token::Ident(ref name) if FUNCTIONS.contains_key(name.as_str()) => {
                    operators.push(token.clone());
                }
                Token::Ident(_) => output.push(token.clone()),
                Token::Op(o1) => {
                    // Negation is a prefix operator: nothing on its left
                    // belongs to it, so it pops nothing.
                    if o1 != Op::Neg {
                        'operators: while let Some(token) = operators.last().cloned() {
                            match token {
                                Token::Op(o2) => {
                                    let pop_me =
                                        o1.is_left_associative() && o1.precedence() <= o2.precedence();
                                    let pop_me = pop_me
                                        || o1.is_right_associative()
                                            && o1.precedence() < o2.precedence();
                                    if pop_me {
                                        operators.pop();
                                        output.push(Token::Op(o2));
                                    } else {
                                        break 'operators;
                                    }
                                }
                                _ => break 'operators,
                            }
                        }
                    }
                    operators.push(Token::Op(o1));
                }
                Token::LParen => {
                    let is_call = matches!(operators.last(), Some(Token::Ident(_)));
                    groups.push(if is_call { Some(0) } else { None });
                    operators.push(Token::LParen);
                }
                Token::Comma => {
                    loop {
                        match operators.last() {
                            Some(Token::LParen) => break,
                            Some(Token::Op(_)) => {
                                if let Some(Token::Op(op)) = operators.pop() {
                                    output.push(Token::Op(op));
                                }
                            }
                            _ => return Err(Error::Syntax("misplaced comma".into())),
                        }
                    }
                    match groups.last_mut() {
                        Some(Some(commas)) => *commas += 1,
                        _ => return Err(Error::Syntax("comma outside a function call".into())),
                    }
                }
                Token::RParen => {
                    let mut closed = false;
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => {
                                closed = true;
                                break;
                            }
                            Token::Op(op) => output.push(Token::Op(op)),
                            Token::Ident(name) => {
                                return Err(Error::Syntax(format!(
                                    "function '{}' is missing its argument list",
                                    name
                                )));
                            }
                            other => {
                                panic!("Internal bug: found {:?} in operators stack", other)
                            }
                        }
                    }
                    if !closed {
                        return Err(Error::Syntax("mismatched parenthesis".into()));
                    }
                    let commas = groups.pop().expect("parenthesis groups out of sync");
                    if let Some(commas) = commas {
                        match operators.pop() {
                            Some(Token::Ident(name)) => {
                                // `f()` reaches here with the parenthesis still
                                // as the previous token
                                let empty = matches!(previous, Some(Token::LParen));
                                let args = if empty { 0 } else { commas + 1 };
                                output.push(Token::Func(name, args));
                            }
                            other => panic!(
                                "Internal bug: expected a function below the parenthesis, found {:?}",
                                other
                            ),
                        }
                    }
                }
                Token::Func(..) => panic!("Internal bug: lexed a resolved function call"),
            }

            previous = Some(token);
        }

        while let Some(token) = operators.pop() {
            match token {
                Token::LParen => return Err(Error::Syntax("mismatched parenthesis".into())),
                Token::Op(op) => output.push(Token::Op(op)),
                Token::Ident(name) => {
                    return Err(Error::Syntax(format!(
                        "function '{}' is missing its argument list",
                        name
                    )));
                }
                other => panic!("Internal bug: found {:?} in operators stack", other),
            }
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(&c) = self.input.get(self.position) {
            if c.is_whitespace() {
                self.position += 1;
                continue;
            }

            let token = match c {
                '+' => {
                    self.position += 1;
                    Token::Op(Op::Plus)
                }
                '-' => {
                    self.position += 1;
                    Token::Op(Op::Minus)
                }
                '*' => {
                    self.position += 1;
                    // `**` is the power operator a computer keyboard produces
                    if self.input.get(self.position) == Some(&'*') {
                        self.position += 1;
                        Token::Op(Op::Pow)
                    } else {
                        Token::Op(Op::Mul)
                    }
                }
                '/' => {
                    self.position += 1;
                    Token::Op(Op::Div)
                }
                '%' => {
                    self.position += 1;
                    Token::Op(Op::Rem)
                }
                '^' => {
                    self.position += 1;
                    Token::Op(Op::Pow)
                }
                // aliases from calculator keypads
                '×' => {
                    self.position += 1;
                    Token::Op(Op::Mul)
                }
                '÷' => {
                    self.position += 1;
                    Token::Op(Op::Div)
                }
                'π' => {
                    self.position += 1;
                    Token::Ident("pi".to_string())
                }
                '√' => {
                    self.position += 1;
                    Token::Ident("sqrt".to_string())
                }
                '(' => {
                    self.position += 1;
                    Token::LParen
                }
                ')' => {
                    self.position += 1;
                    Token::RParen
                }
                ',' => {
                    self.position += 1;
                    Token::Comma
                }
                c if c.is_ascii_digit() || (c == '.' && self.peek_digit(self.position + 1)) => {
                    self.number()?
                }
                c if c.is_ascii_alphabetic() || c == '_' => self.ident(),
                other => {
                    return Err(Error::Syntax(format!(
                        "unexpected character '{}' in input",
                        other
                    )));
                }
            };
            return Ok(Some(token));
        }
        Ok(None)
    }

    fn peek_digit(&self, position: usize) -> bool {
        match self.input.get(position) {
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Scan a float literal: digits, an optional fraction and an optional
    /// exponent. The `e` of `2e3` is only an exponent marker when followed
    /// by a digit (with an optional sign); otherwise it is left alone as
    /// the constant `e`.
    fn number(&mut self) -> Result<Token, Error> {
        let start = self.position;
        while self.peek_digit(self.position) {
            self.position += 1;
        }
        if self.input.get(self.position) == Some(&'.') {
            self.position += 1;
            while self.peek_digit(self.position) {
                self.position += 1;
            }
        }
        if matches!(self.input.get(self.position), Some(&'e') | Some(&'E')) {
            let mut lookahead = self.position + 1;
            if matches!(self.input.get(lookahead), Some(&'+') | Some(&'-')) {
                lookahead += 1;
            }
            if self.peek_digit(lookahead) {
                self.position = lookahead + 1;
                while self.peek_digit(self.position) {
                    self.position += 1;
                }
            }
        }

        let literal: String = self.input[start..self.position].iter().collect();
        match literal.parse() {
            Ok(number) => Ok(Token::Number(number)),
            Err(_) => Err(Error::Syntax(format!("invalid number '{}'", literal))),
        }
    }

    /// Scan an identifier, normalized to lowercase so `PI`, `Sin(` and
    /// `nPr(` from the button grid all resolve.
    fn ident(&mut self) -> Token {
        let start = self.position;
        while matches!(
            self.input.get(self.position),
            Some(c) if c.is_ascii_alphanumeric() || *c == '_'
        ) {
            self.position += 1;
        }
        let word: String = self.input[start..self.position].iter().collect();
        Token::Ident(word.to_ascii_lowercase())
    }
}
