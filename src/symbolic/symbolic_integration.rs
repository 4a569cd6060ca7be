//! # Symbolic Integration Module
//!
//! Antiderivatives are found term by term on the canonical form. A term is split into
//! the factors free of the integration variable (pulled out as a constant) and the
//! dependent factors. The dependent part must be one of
//! - `x^n`, with `x^(-1)` giving `ln(x)`
//! - `f(a*x + b)` for `f` in exp, sin, cos, sinh, cosh
//! - `(a*x + b)^q`
//!
//! Anything else (products of several dependent factors, nonlinear arguments) fails
//! with [`SymbolicError::NoClosedForm`].

use crate::symbolic::symbolic_canonical::{Atom, Monomial, Poly, rat};
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_errors::{SymbolicError, SymbolicResult};
use num::{BigRational, One};
use std::collections::BTreeMap;

impl Poly {
    /// slope `a` of an argument `a*x + b`, `None` if the argument is not linear in `var`
    fn linear_slope(arg: &Poly, var: &str) -> SymbolicResult<Option<Poly>> {
        let slope = arg.diff(var)?;
        if slope.is_zero() || slope.contains_variable(var) {
            Ok(None)
        } else {
            Ok(Some(slope))
        }
    }

    /// antiderivative of a single dependent factor `atom^exp`
    fn integrate_factor(atom: &Atom, exp: &BigRational, var: &str) -> SymbolicResult<Option<Poly>> {
        let minus_one = -BigRational::one();
        let primitive = match atom {
            Atom::Var(_) => {
                let x = Poly::from_atom(atom.clone());
                if *exp == minus_one {
                    Poly::func(Function::Ln, x)?
                } else {
                    let raised = exp + BigRational::one();
                    x.pow_rational(&raised)?.scale(&raised.recip())
                }
            }
            Atom::Func(func, arg) if exp.is_one() => {
                let Some(slope) = Poly::linear_slope(arg, var)? else {
                    return Ok(None);
                };
                let outer = match func {
                    Function::Exp => Poly::func(Function::Exp, arg.clone())?,
                    Function::Sin => Poly::func(Function::Cos, arg.clone())?.scale(&rat(-1)),
                    Function::Cos => Poly::func(Function::Sin, arg.clone())?,
                    Function::Sinh => Poly::func(Function::Cosh, arg.clone())?,
                    Function::Cosh => Poly::func(Function::Sinh, arg.clone())?,
                    _ => return Ok(None),
                };
                outer.mul(&slope.pow_int(-1)?)
            }
            Atom::Base(base) => {
                let Some(slope) = Poly::linear_slope(base, var)? else {
                    return Ok(None);
                };
                let outer = if *exp == minus_one {
                    Poly::func(Function::Ln, base.clone())?
                } else {
                    let raised = exp + BigRational::one();
                    base.pow_rational(&raised)?.scale(&raised.recip())
                };
                outer.mul(&slope.pow_int(-1)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(primitive))
    }

    pub(crate) fn integrate(&self, var: &str) -> SymbolicResult<Poly> {
        let x = Poly::from_atom(Atom::Var(var.to_string()));
        let mut result = Poly::zero();
        for (mono, coeff) in self.terms() {
            let (dependent, free): (BTreeMap<_, _>, BTreeMap<_, _>) = mono
                .factors()
                .iter()
                .map(|(atom, exp)| (atom.clone(), exp.clone()))
                .partition(|(atom, _)| atom.contains_variable(var));
            let constant = Poly::from_term(Monomial(free), coeff.clone());
            let mut factors = dependent.iter();
            let primitive = match (factors.next(), factors.next()) {
                (None, _) => Some(x.clone()),
                (Some((atom, exp)), None) => Poly::integrate_factor(atom, exp, var)?,
                _ => None,
            };
            match primitive {
                Some(primitive) => result.absorb(constant.mul(&primitive)),
                None => {
                    return Err(SymbolicError::NoClosedForm {
                        integrand: Poly::term_to_expr(mono, coeff).to_string(),
                        var: var.to_string(),
                    });
                }
            }
        }
        Ok(result)
    }
}

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Indefinite integral with respect to `var`, simplified, without a constant of
    /// integration.
    pub fn integrate(&self, var: &str) -> SymbolicResult<Expr> {
        Ok(self.to_canonical()?.integrate(var)?.to_expr())
    }

    /// Definite integral `F(upper) - F(lower)` with `F` the antiderivative in `var`.
    /// Bounds may be expressions in other variables; a bound at a singularity of `F`
    /// (for instance `ln` at 0) is an error.
    pub fn definite_integrate(&self, var: &str, lower: &Expr, upper: &Expr) -> SymbolicResult<Expr> {
        let primitive = self.to_canonical()?.integrate(var)?;
        let at_upper = primitive.substitute(var, &upper.to_canonical()?)?;
        let at_lower = primitive.substitute(var, &lower.to_canonical()?)?;
        Ok(at_upper.sub(&at_lower).to_expr())
    }
}
