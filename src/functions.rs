use hashbrown::HashMap;

use crate::angle::AngleMode;
use crate::error::Error;

/// Signature shared by every registered function: the argument values and
/// the angle mode of the current evaluation.
pub type Apply = fn(&[f64], AngleMode) -> Result<f64, Error>;

/// A callable function of the calculator language.
///
/// Arity is validated against `min_args`/`max_args` when the AST is built,
/// so `apply` can index its argument slice directly.
#[derive(Debug, Clone, Copy)]
pub struct FuncDef {
    /// Lowercase name the lexer resolves
    pub name: &'static str,
    /// Smallest accepted argument count
    pub min_args: usize,
    /// Largest accepted argument count
    pub max_args: usize,
    /// The implementation
    pub apply: Apply,
}

impl PartialEq for FuncDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FuncDef {}

lazy_static! {
    /// Registry of callable functions, keyed by lowercase name.
    pub static ref FUNCTIONS: HashMap<&'static str, FuncDef> = {
        let defs = [
            FuncDef { name: "sin", min_args: 1, max_args: 1, apply: sin },
            FuncDef { name: "cos", min_args: 1, max_args: 1, apply: cos },
            FuncDef { name: "tan", min_args: 1, max_args: 1, apply: tan },
            FuncDef { name: "sqrt", min_args: 1, max_args: 1, apply: sqrt },
            FuncDef { name: "root", min_args: 1, max_args: 2, apply: root },
            FuncDef { name: "ln", min_args: 1, max_args: 1, apply: ln },
            FuncDef { name: "log", min_args: 1, max_args: 2, apply: log },
            FuncDef { name: "log10", min_args: 1, max_args: 1, apply: log10 },
            FuncDef { name: "exp", min_args: 1, max_args: 1, apply: exp },
            FuncDef { name: "abs", min_args: 1, max_args: 1, apply: abs },
            FuncDef { name: "round", min_args: 1, max_args: 1, apply: round },
            FuncDef { name: "pow", min_args: 2, max_args: 2, apply: pow },
            FuncDef { name: "fact", min_args: 1, max_args: 1, apply: fact },
            FuncDef { name: "npr", min_args: 2, max_args: 2, apply: npr },
            FuncDef { name: "ncr", min_args: 2, max_args: 2, apply: ncr },
        ];
        let mut map = HashMap::new();
        for def in &defs {
            map.insert(def.name, *def);
        }
        map.shrink_to_fit();
        map
    };

    /// Named constants, usable anywhere a number is.
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut map = HashMap::new();
        map.insert("pi", std::f64::consts::PI);
        map.insert("e", std::f64::consts::E);
        map.shrink_to_fit();
        map
    };
}

/// Tolerance used to reject trigonometric poles
const POLE_EPS: f64 = 1e-12;

fn sin(args: &[f64], mode: AngleMode) -> Result<f64, Error> {
    Ok(mode.to_radians(args[0]).sin())
}

fn cos(args: &[f64], mode: AngleMode) -> Result<f64, Error> {
    Ok(mode.to_radians(args[0]).cos())
}

fn tan(args: &[f64], mode: AngleMode) -> Result<f64, Error> {
    let angle = args[0];
    // tan is undefined at 90° + k*180°, resp. π/2 + k*π
    let at_pole = match mode {
        AngleMode::Degrees => (angle.rem_euclid(180.0) - 90.0).abs() < POLE_EPS,
        AngleMode::Radians => {
            (angle - std::f64::consts::FRAC_PI_2).rem_euclid(std::f64::consts::PI) < POLE_EPS
        }
    };
    if at_pole {
        return Err(Error::Domain("tangent undefined at this angle".into()));
    }
    Ok(mode.to_radians(angle).tan())
}

fn sqrt(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let x = args[0];
    if x < 0.0 {
        return Err(Error::Domain("square root of a negative number".into()));
    }
    Ok(x.sqrt())
}

/// `root(x)` is the square root, `root(x, n)` the nth root. Negative `x` is
/// allowed only for odd `n`, where the real root exists.
fn root(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let x = args[0];
    let n = args.get(1).copied().unwrap_or(2.0);
    if n.fract() != 0.0 || n < 1.0 {
        return Err(Error::Domain("root index must be a positive integer".into()));
    }
    if x < 0.0 {
        if (n as i64) % 2 == 0 {
            return Err(Error::Domain("even root of a negative number".into()));
        }
        return Ok(-(-x).powf(1.0 / n));
    }
    Ok(x.powf(1.0 / n))
}

fn ln(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let x = args[0];
    if x <= 0.0 {
        return Err(Error::Domain("logarithm of a non-positive number".into()));
    }
    Ok(x.ln())
}

/// `log(x)` is base 10, `log(x, base)` uses an explicit base.
fn log(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let x = args[0];
    let base = args.get(1).copied().unwrap_or(10.0);
    if x <= 0.0 {
        return Err(Error::Domain("logarithm of a non-positive number".into()));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(Error::Domain("invalid logarithm base".into()));
    }
    Ok(x.log(base))
}

fn log10(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let x = args[0];
    if x <= 0.0 {
        return Err(Error::Domain("logarithm of a non-positive number".into()));
    }
    Ok(x.log10())
}

fn exp(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    Ok(args[0].exp())
}

fn abs(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    Ok(args[0].abs())
}

fn round(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    Ok(args[0].round())
}

fn pow(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    Ok(args[0].powf(args[1]))
}

fn as_integer(value: f64, what: &str) -> Result<i64, Error> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::Domain(format!("{} must be an integer", what)));
    }
    Ok(value as i64)
}

fn fact(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let n = as_integer(args[0], "factorial argument")?;
    if n < 0 {
        return Err(Error::Domain("factorial of a negative number".into()));
    }
    // 171! overflows f64
    if n > 170 {
        return Err(Error::Domain("factorial result too large".into()));
    }
    let mut acc = 1.0;
    for k in 2..=n {
        acc *= k as f64;
    }
    Ok(acc)
}

fn npr(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let n = as_integer(args[0], "npr argument")?;
    let r = as_integer(args[1], "npr argument")?;
    if n < 0 || r < 0 || r > n {
        return Err(Error::Domain("npr requires 0 <= r <= n".into()));
    }
    // n * (n-1) * ... * (n-r+1)
    let mut acc = 1.0;
    for k in 0..r {
        acc *= (n - k) as f64;
        if acc.is_infinite() {
            return Err(Error::Domain("permutation count too large".into()));
        }
    }
    Ok(acc)
}

fn ncr(args: &[f64], _mode: AngleMode) -> Result<f64, Error> {
    let n = as_integer(args[0], "ncr argument")?;
    let r = as_integer(args[1], "ncr argument")?;
    if n < 0 || r < 0 || r > n {
        return Err(Error::Domain("ncr requires 0 <= r <= n".into()));
    }
    let r = r.min(n - r);
    // multiplicative form keeps intermediates near the result's magnitude
    let mut acc = 1.0;
    for k in 1..=r {
        acc *= (n - r + k) as f64 / k as f64;
        if acc.is_infinite() {
            return Err(Error::Domain("combination count too large".into()));
        }
    }
    Ok(acc.round())
}
