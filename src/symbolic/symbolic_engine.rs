//! # Symbolic Engine Module
//!
//! Core expression type of the crate. Expressions are immutable trees with exact rational
//! constants, so that the terms produced by the Adomian recurrence keep their closed forms
//! (ξ²/6 rather than 0.1666…·ξ²).
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbolic variables like "x", "xi", "u"
//! - **Constants**: `Const(BigRational)` - exact rational constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Func(Function, arg)` - exp, ln, sin, cos, cosh, ...
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - Create multiple variables from comma-separated string
//! - `substitute_variable()` - Replace a variable with an expression
//! - `diff(var)` / `diff_n(var, n)` - Analytical differentiation
//! - `simplify()` - Canonical algebraic simplification
//! - `integrate(var)` / `definite_integrate(var, a, b)` - Symbolic integration
//! - `fresh_variable()` - Name generation for dummy variables
//!
//! Functions keep the mathematical notation of the rest of the crate (tg, ctg, arctg)
//! instead of programming conventions (tan, cot, atan).

#![allow(non_camel_case_types)]

use num::{BigInt, BigRational, One, Signed, Zero};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Elementary functions known to the engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum Function {
    #[strum(to_string = "exp")]
    Exp,
    #[strum(to_string = "ln", serialize = "log")]
    Ln,
    #[strum(to_string = "sin")]
    Sin,
    #[strum(to_string = "cos")]
    Cos,
    #[strum(to_string = "tg", serialize = "tan")]
    Tg,
    #[strum(to_string = "ctg", serialize = "cot")]
    Ctg,
    #[strum(to_string = "arcsin", serialize = "asin")]
    Arcsin,
    #[strum(to_string = "arccos", serialize = "acos")]
    Arccos,
    #[strum(to_string = "arctg", serialize = "arctan", serialize = "atan")]
    Arctg,
    #[strum(to_string = "arcctg", serialize = "arccot")]
    Arcctg,
    #[strum(to_string = "sinh")]
    Sinh,
    #[strum(to_string = "cosh")]
    Cosh,
    #[strum(to_string = "tanh")]
    Tanh,
}

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::int(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "xi", "C")
    Var(String),
    /// Exact rational constant
    Const(BigRational),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Elementary function applied to an argument
    Func(Function, Box<Expr>),
}

// binding strength used by Display
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => PREC_ADD,
            Expr::Mul(lhs, _) if lhs.is_minus_one() => PREC_NEG,
            Expr::Mul(..) | Expr::Div(..) => PREC_MUL,
            Expr::Const(c) if c.is_negative() => PREC_NEG,
            Expr::Const(c) if !c.is_integer() => PREC_MUL,
            Expr::Pow(..) => PREC_POW,
            Expr::Var(_) | Expr::Const(_) | Expr::Func(..) => PREC_ATOM,
        }
    }

    fn fmt_wrapped(&self, f: &mut fmt::Formatter, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Renders with the minimal set of parentheses; the result parses back with
/// [`Expr::parse_expression`].
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => {
                lhs.fmt_wrapped(f, PREC_ADD)?;
                write!(f, " + ")?;
                rhs.fmt_wrapped(f, PREC_ADD + 1)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.fmt_wrapped(f, PREC_ADD)?;
                write!(f, " - ")?;
                rhs.fmt_wrapped(f, PREC_ADD + 1)
            }
            Expr::Mul(lhs, rhs) if lhs.is_minus_one() => {
                write!(f, "-")?;
                rhs.fmt_wrapped(f, PREC_MUL + 1)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.fmt_wrapped(f, PREC_MUL)?;
                write!(f, "*")?;
                rhs.fmt_wrapped(f, PREC_MUL + 1)
            }
            Expr::Div(lhs, rhs) => {
                lhs.fmt_wrapped(f, PREC_MUL)?;
                write!(f, "/")?;
                rhs.fmt_wrapped(f, PREC_MUL + 1)
            }
            Expr::Pow(base, exp) => {
                base.fmt_wrapped(f, PREC_POW + 1)?;
                write!(f, "^")?;
                exp.fmt_wrapped(f, PREC_POW + 1)
            }
            Expr::Func(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::Add(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::Sub(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::Mul(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::DivAssign for Expr {
    fn div_assign(&mut self, rhs: Self) {
        *self = Expr::Div(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::int(-1)), Box::new(self))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

impl From<BigRational> for Expr {
    fn from(value: BigRational) -> Self {
        Expr::Const(value)
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Expr::var)
            .collect()
    }

    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Integer constant.
    pub fn int(value: i64) -> Expr {
        Expr::Const(BigRational::from_integer(BigInt::from(value)))
    }

    /// Rational constant `numer/denom`. `denom` must be non-zero.
    pub fn rational(numer: i64, denom: i64) -> Expr {
        Expr::Const(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn apply(func: Function, arg: Expr) -> Expr {
        Expr::Func(func, arg.boxed())
    }

    pub fn exp(self) -> Expr {
        Expr::apply(Function::Exp, self)
    }

    pub fn ln(self) -> Expr {
        Expr::apply(Function::Ln, self)
    }

    pub fn sin(self) -> Expr {
        Expr::apply(Function::Sin, self)
    }

    pub fn cos(self) -> Expr {
        Expr::apply(Function::Cos, self)
    }

    pub fn sinh(self) -> Expr {
        Expr::apply(Function::Sinh, self)
    }

    pub fn cosh(self) -> Expr {
        Expr::apply(Function::Cosh, self)
    }

    /// true if expression is the constant 0
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if val.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if val.is_one())
    }

    fn is_minus_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == -BigRational::one())
    }

    /// Rebuilds the node with every direct subexpression mapped through `f`.
    pub(crate) fn map_children<F>(&self, mut f: F) -> Expr
    where
        F: FnMut(&Expr) -> Expr,
    {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Pow(base, exp) => Expr::Pow(f(base).boxed(), f(exp).boxed()),
            Expr::Func(func, arg) => Expr::Func(*func, f(arg).boxed()),
        }
    }

    /// substitute a variable with an expression
    pub fn substitute_variable(&self, var: &str, expr: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => expr.clone(),
            _ => self.map_children(|child| child.substitute_variable(var, expr)),
        }
    }

    /// Renames a variable throughout the expression.
    pub fn rename_variable(&self, old_var: &str, new_var: &str) -> Expr {
        self.substitute_variable(old_var, &Expr::var(new_var))
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Func(_, arg) => arg.contains_variable(var_name),
        }
    }

    fn collect_variables(&self, acc: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                acc.insert(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(acc);
                rhs.collect_variables(acc);
            }
            Expr::Func(_, arg) => arg.collect_variables(acc),
        }
    }

    /// sorted names of all variables of the expression, without duplicates
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut acc = BTreeSet::new();
        self.collect_variables(&mut acc);
        acc.into_iter().collect()
    }

    /// Picks a variable name derived from `hint` that does not occur in `taken`:
    /// `hint` itself if free, otherwise `hint1`, `hint2`, ...
    pub fn fresh_variable(hint: &str, taken: &HashSet<String>) -> String {
        if !taken.contains(hint) {
            return hint.to_string();
        }
        (1..)
            .map(|i| format!("{}{}", hint, i))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| hint.to_string())
    }
}

/// n! as an exact integer
pub fn factorial(n: usize) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, i| acc * BigInt::from(i))
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates variables x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        ($($crate::symbolic::symbolic_engine::Expr::Var(stringify!($var).to_string())),+)
    };
}
