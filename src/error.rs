use std::error;
use std::fmt::{self, Display, Formatter};

/// Error type for the scieval crate
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The input could not be parsed: bad syntax, an unknown name, or a
    /// function called with the wrong number of arguments
    Syntax(String),
    /// Division or modulo by zero during evaluation
    DivisionByZero,
    /// A function argument outside its domain, or a result outside the
    /// representable range
    Domain(String),
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Syntax(ref message) => write!(fmt, "Invalid Expression: {}", message),
            Self::DivisionByZero => write!(fmt, "Division by Zero"),
            Self::Domain(ref message) => write!(fmt, "Domain Error: {}", message),
        }
    }
}

impl error::Error for Error {}
