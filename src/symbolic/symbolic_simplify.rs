//! # Symbolic Expression Simplification Module
//!
//! `simplify()` rewrites an expression into the canonical expanded form of
//! [`symbolic_canonical`](crate::symbolic::symbolic_canonical) and renders it back as an
//! expression tree:
//!
//! - `x + x` → `2*x`, `x*x^2` → `x^3`
//! - `(x + 1)^2` → `1 + 2*x + x^2`
//! - `(1 - C)^(3/2)` stays a power of a sum
//! - `4^(1/2)` → `2`, `exp(0)` → `1`
//! - `x/0`, `0^(-1)`, `ln(0)` are errors
//!
//! Simplification is idempotent and two inputs with the same canonical form render to
//! structurally equal trees, so `==` on simplified expressions is a usable equality test.

use crate::symbolic::symbolic_canonical::{Atom, Poly};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::{SymbolicError, SymbolicResult};
use num::{BigRational, Zero};

impl Expr {
    pub(crate) fn to_canonical(&self) -> SymbolicResult<Poly> {
        let canonical = match self {
            Expr::Var(name) => Poly::from_atom(Atom::Var(name.clone())),
            Expr::Const(c) => Poly::constant(c.clone()),
            Expr::Add(lhs, rhs) => lhs.to_canonical()?.add(&rhs.to_canonical()?),
            Expr::Sub(lhs, rhs) => lhs.to_canonical()?.sub(&rhs.to_canonical()?),
            Expr::Mul(lhs, rhs) => lhs.to_canonical()?.mul(&rhs.to_canonical()?),
            Expr::Div(lhs, rhs) => {
                let denominator = rhs.to_canonical()?;
                if denominator.is_zero() {
                    return Err(SymbolicError::DivisionByZero(self.to_string()));
                }
                lhs.to_canonical()?.mul(&denominator.pow_int(-1)?)
            }
            Expr::Pow(base, exp) => base.to_canonical()?.pow(&exp.to_canonical()?)?,
            Expr::Func(func, arg) => Poly::func(*func, arg.to_canonical()?)?,
        };
        Ok(canonical)
    }

    /// Algebraic simplification into the canonical expanded form.
    pub fn simplify(&self) -> SymbolicResult<Expr> {
        Ok(self.to_canonical()?.to_expr())
    }

    /// Rational value of an expression without variables, `None` otherwise.
    pub fn as_rational(&self) -> SymbolicResult<Option<BigRational>> {
        Ok(self.to_canonical()?.as_constant())
    }

    /// The addends of the simplified expression, in canonical order.
    pub fn simplified_terms(&self) -> SymbolicResult<Vec<Expr>> {
        let canonical = self.to_canonical()?;
        Ok(canonical
            .terms()
            .iter()
            .map(|(mono, coeff)| Poly::term_to_expr(mono, coeff))
            .collect())
    }

    /// Largest exponent of `var` over the terms of the simplified expression; 0 for an
    /// expression free of `var`.
    pub fn degree_in(&self, var: &str) -> SymbolicResult<BigRational> {
        let canonical = self.to_canonical()?;
        let var_atom = Atom::Var(var.to_string());
        let degree = canonical
            .terms()
            .keys()
            .filter_map(|mono| mono.factors().get(&var_atom).cloned())
            .max()
            .unwrap_or_else(BigRational::zero);
        Ok(degree)
    }
}
