//! # Symbolic Engine Derivatives Module
//!
//! ### Differentiation
//! - `diff(var: &str)` - one analytical derivative built from the calculus rules
//!   (product, quotient, chain and general power rule); the result is not simplified
//! - `diff_n(var, order)` - derivative of any order, computed on the canonical form and
//!   simplified after every step so that the expression does not grow with nested
//!   product rules

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_errors::SymbolicResult;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::var("x");
    /// let f = x.clone().pow(Expr::int(2)); // x^2
    /// let df_dx = f.diff("x"); // 2*x^(2 - 1)*1
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::int(1)
                } else {
                    Expr::int(0)
                }
            }
            Expr::Const(_) => Expr::int(0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * *rhs.clone() + *lhs.clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                (lhs.diff(var) * *rhs.clone() - *lhs.clone() * rhs.diff(var))
                    / rhs.clone().pow(Expr::int(2))
            }
            Expr::Pow(base, exp) => {
                let base = *base.clone();
                let exp = *exp.clone();
                if !exp.contains_variable(var) {
                    // power rule
                    let d_base = base.diff(var);
                    exp.clone() * base.pow(exp - Expr::int(1)) * d_base
                } else if !base.contains_variable(var) {
                    // d(a^f) = a^f * ln(a) * f'
                    let d_exp = exp.diff(var);
                    self.clone() * base.ln() * d_exp
                } else {
                    // d(f^g) = f^g * (g' ln(f) + g f'/f)
                    let d_base = base.diff(var);
                    let d_exp = exp.diff(var);
                    self.clone() * (d_exp * base.clone().ln() + exp * d_base / base)
                }
            }
            Expr::Func(func, arg) => Expr::outer_derivative(*func, arg) * arg.diff(var),
        }
    }

    fn outer_derivative(func: Function, arg: &Expr) -> Expr {
        let arg = arg.clone();
        let one = Expr::int(1);
        let half = Expr::rational(1, 2);
        match func {
            Function::Exp => arg.exp(),
            Function::Ln => one / arg,
            Function::Sin => arg.cos(),
            Function::Cos => -arg.sin(),
            Function::Tg => one / arg.cos().pow(Expr::int(2)),
            Function::Ctg => -(one / arg.sin().pow(Expr::int(2))),
            Function::Arcsin => one.clone() / (one - arg.pow(Expr::int(2))).pow(half),
            Function::Arccos => -(one.clone() / (one - arg.pow(Expr::int(2))).pow(half)),
            Function::Arctg => one.clone() / (one + arg.pow(Expr::int(2))),
            Function::Arcctg => -(one.clone() / (one + arg.pow(Expr::int(2)))),
            Function::Sinh => arg.cosh(),
            Function::Cosh => arg.sinh(),
            Function::Tanh => one / arg.cosh().pow(Expr::int(2)),
        }
    }

    /// `order`-th derivative with respect to `var`, simplified. `order = 0` only simplifies.
    pub fn diff_n(&self, var: &str, order: usize) -> SymbolicResult<Expr> {
        let mut derivative = self.to_canonical()?;
        for _ in 0..order {
            derivative = derivative.diff(var)?;
        }
        Ok(derivative.to_expr())
    }

    /// `diff_n` for a result that is only ever evaluated at `var = 0`.
    ///
    /// Before step `j` every term carrying `var^m` with `m > order - j` is dropped: each
    /// remaining derivative lowers that power by at most one, so such a term vanishes at
    /// the origin. Powers of `var` inside sums, roots or function arguments are kept.
    /// The result therefore agrees with `diff_n` after substituting `var = 0`, while the
    /// intermediate polynomials stay small.
    pub fn truncated_diff_n(&self, var: &str, order: usize) -> SymbolicResult<Expr> {
        let mut derivative = self.to_canonical()?.truncate_degree(var, order);
        for step in 1..=order {
            derivative = derivative.diff(var)?.truncate_degree(var, order - step);
        }
        Ok(derivative.to_expr())
    }
}
