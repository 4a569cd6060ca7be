//! # Canonical Form
//!
//! Expanded sum-of-products representation behind `simplify`, `diff_n` and the
//! integrator. A [`Poly`] maps each [`Monomial`] to its exact rational coefficient; a
//! monomial maps each [`Atom`] to a rational exponent. Both maps are ordered, so two
//! mathematically equal inputs that normalise the same way give structurally equal
//! output.
//!
//! Normalisation rules:
//! - like terms are collected, zero coefficients and zero exponents are dropped
//! - positive integer powers of sums are expanded
//! - negative integer powers of single terms are inverted
//! - fractional powers of rationals are evaluated when the root is exact
//! - a fractional or negative power of a sum is kept as an irreducible `Base` atom; its
//!   rational content is moved out first (with the sign too for integer powers), so
//!   `1/(2 - 2*C)` and `-1/(2*C - 2)` share the atom `(1 - C)^(-1)`
//! - elementary functions are evaluated at their trivial points (exp(0), ln(1), sin(0), ...)

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_errors::{SymbolicError, SymbolicResult};
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Atom {
    Var(String),
    /// a sum, or a rational without an exact root, under a non-expandable power
    Base(Poly),
    Func(Function, Poly),
    /// base ^ exponent with a non-constant exponent
    Power(Poly, Poly),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Monomial(pub(crate) BTreeMap<Atom, BigRational>);

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Poly(BTreeMap<Monomial, BigRational>);

pub(crate) fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn as_small_int(q: &BigRational) -> Option<i64> {
    if q.is_integer() {
        q.to_integer().to_i64()
    } else {
        None
    }
}

fn rational_powi(c: &BigRational, n: i64) -> BigRational {
    let p = num::pow(c.clone(), n.unsigned_abs() as usize);
    if n < 0 { p.recip() } else { p }
}

fn exact_root(n: &BigInt, k: u32) -> Option<BigInt> {
    if n.is_negative() && k % 2 == 0 {
        return None;
    }
    let root = n.nth_root(k);
    if num::pow(root.clone(), k as usize) == *n {
        Some(root)
    } else {
        None
    }
}

/// c^q when the result is rational
fn exact_rational_power(c: &BigRational, q: &BigRational) -> Option<BigRational> {
    let k = q.denom().to_u32()?;
    let base = BigRational::new(exact_root(c.numer(), k)?, exact_root(c.denom(), k)?);
    let power = q.numer().to_i64()?;
    if base.is_zero() && power < 0 {
        return None;
    }
    Some(rational_powi(&base, power))
}

impl Atom {
    pub(crate) fn contains_variable(&self, var: &str) -> bool {
        match self {
            Atom::Var(name) => name == var,
            Atom::Base(base) => base.contains_variable(var),
            Atom::Func(_, arg) => arg.contains_variable(var),
            Atom::Power(base, exp) => base.contains_variable(var) || exp.contains_variable(var),
        }
    }

    fn to_expr(&self) -> Expr {
        match self {
            Atom::Var(name) => Expr::Var(name.clone()),
            Atom::Base(base) => base.to_expr(),
            Atom::Func(func, arg) => Expr::apply(*func, arg.to_expr()),
            Atom::Power(base, exp) => base.to_expr().pow(exp.to_expr()),
        }
    }

    /// value of the atom itself (exponent 1) after substitution
    fn substitute(&self, var: &str, value: &Poly) -> SymbolicResult<Poly> {
        match self {
            Atom::Var(name) if name == var => Ok(value.clone()),
            Atom::Var(_) => Ok(Poly::from_atom(self.clone())),
            Atom::Base(base) => base.substitute(var, value),
            Atom::Func(func, arg) => Poly::func(*func, arg.substitute(var, value)?),
            Atom::Power(base, exp) => base
                .substitute(var, value)?
                .pow(&exp.substitute(var, value)?),
        }
    }

    fn diff(&self, var: &str) -> SymbolicResult<Poly> {
        match self {
            Atom::Var(name) if name == var => Ok(Poly::one()),
            Atom::Var(_) => Ok(Poly::zero()),
            Atom::Base(base) => base.diff(var),
            Atom::Func(func, arg) => {
                let inner = arg.diff(var)?;
                if inner.is_zero() {
                    return Ok(Poly::zero());
                }
                Ok(Poly::func_derivative(*func, arg)?.mul(&inner))
            }
            // d(b^e) = b^e * (e' ln(b) + e b'/b)
            Atom::Power(base, exp) => {
                let d_base = base.diff(var)?;
                let d_exp = exp.diff(var)?;
                let mut factor = Poly::zero();
                if !d_exp.is_zero() {
                    factor.absorb(d_exp.mul(&Poly::func(Function::Ln, base.clone())?));
                }
                if !d_base.is_zero() {
                    factor.absorb(exp.mul(&d_base).mul(&base.pow_int(-1)?));
                }
                Ok(Poly::from_atom(self.clone()).mul(&factor))
            }
        }
    }
}

impl Monomial {
    pub(crate) fn factors(&self) -> &BTreeMap<Atom, BigRational> {
        &self.0
    }

    fn mul(&self, other: &Monomial) -> Monomial {
        let mut factors = self.0.clone();
        for (atom, exp) in &other.0 {
            match factors.entry(atom.clone()) {
                Entry::Occupied(mut entry) => {
                    *entry.get_mut() += exp;
                    if entry.get().is_zero() {
                        entry.remove();
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(exp.clone());
                }
            }
        }
        Monomial(factors)
    }

    fn scale_exponents(&self, q: &BigRational) -> Monomial {
        Monomial(
            self.0
                .iter()
                .map(|(atom, exp)| (atom.clone(), exp * q))
                .filter(|(_, exp)| !exp.is_zero())
                .collect(),
        )
    }
}

impl Poly {
    pub(crate) fn zero() -> Poly {
        Poly(BTreeMap::new())
    }

    pub(crate) fn one() -> Poly {
        Poly::constant(BigRational::one())
    }

    pub(crate) fn constant(c: BigRational) -> Poly {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(Monomial::default(), c);
        }
        Poly(terms)
    }

    pub(crate) fn from_atom(atom: Atom) -> Poly {
        Poly::from_atom_pow(atom, BigRational::one())
    }

    pub(crate) fn from_atom_pow(atom: Atom, exp: BigRational) -> Poly {
        Poly::from_term(Monomial(BTreeMap::from([(atom, exp)])), BigRational::one())
    }

    /// Normalising constructor of a single term: `Base` factors with a positive integer
    /// exponent (and single-term bases with any integer exponent) are multiplied out.
    pub(crate) fn from_term(mono: Monomial, coeff: BigRational) -> Poly {
        if coeff.is_zero() {
            return Poly::zero();
        }
        let mut rest = BTreeMap::new();
        let mut pending: Vec<(Poly, i64)> = Vec::new();
        for (atom, exp) in mono.0 {
            if let (Atom::Base(base), Some(n)) = (&atom, as_small_int(&exp)) {
                if n > 0 || base.single_term().is_some() {
                    pending.push((base.clone(), n));
                    continue;
                }
            }
            rest.insert(atom, exp);
        }
        let mut result = Poly(BTreeMap::from([(Monomial(rest), coeff)]));
        for (base, n) in pending {
            let factor = if n > 0 {
                base.pow_positive(n.unsigned_abs())
            } else {
                base.invert_term().pow_positive(n.unsigned_abs())
            };
            result = result.mul(&factor);
        }
        result
    }

    pub(crate) fn terms(&self) -> &BTreeMap<Monomial, BigRational> {
        &self.0
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// value of a polynomial without atoms
    pub(crate) fn as_constant(&self) -> Option<BigRational> {
        match self.0.len() {
            0 => Some(BigRational::zero()),
            1 => self
                .0
                .iter()
                .next()
                .filter(|(mono, _)| mono.0.is_empty())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    fn single_term(&self) -> Option<(&Monomial, &BigRational)> {
        if self.0.len() == 1 {
            self.0.iter().next()
        } else {
            None
        }
    }

    /// the atom `a` if the polynomial is exactly `1*a^1`
    fn as_bare_atom(&self) -> Option<&Atom> {
        let (mono, coeff) = self.single_term()?;
        if !coeff.is_one() || mono.0.len() != 1 {
            return None;
        }
        mono.0
            .iter()
            .next()
            .filter(|(_, exp)| exp.is_one())
            .map(|(atom, _)| atom)
    }

    pub(crate) fn contains_variable(&self, var: &str) -> bool {
        self.0
            .keys()
            .any(|mono| mono.0.keys().any(|atom| atom.contains_variable(var)))
    }

    fn add_term(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.0.entry(mono) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coeff;
                if entry.get().is_zero() {
                    entry.remove();
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(coeff);
            }
        }
    }

    pub(crate) fn absorb(&mut self, other: Poly) {
        for (mono, coeff) in other.0 {
            self.add_term(mono, coeff);
        }
    }

    pub(crate) fn add(&self, other: &Poly) -> Poly {
        let mut result = self.clone();
        result.absorb(other.clone());
        result
    }

    pub(crate) fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.scale(&rat(-1)))
    }

    pub(crate) fn scale(&self, c: &BigRational) -> Poly {
        if c.is_zero() {
            return Poly::zero();
        }
        Poly(
            self.0
                .iter()
                .map(|(mono, coeff)| (mono.clone(), coeff * c))
                .collect(),
        )
    }

    pub(crate) fn mul(&self, other: &Poly) -> Poly {
        let mut result = Poly::zero();
        for (m1, c1) in &self.0 {
            for (m2, c2) in &other.0 {
                result.absorb(Poly::from_term(m1.mul(m2), c1 * c2));
            }
        }
        result
    }

    fn pow_positive(&self, n: u64) -> Poly {
        if let Some((mono, coeff)) = self.single_term() {
            let n = n as i64;
            return Poly::from_term(mono.scale_exponents(&rat(n)), rational_powi(coeff, n));
        }
        (0..n).fold(Poly::one(), |acc, _| acc.mul(self))
    }

    /// 1/self for a single non-zero term
    fn invert_term(&self) -> Poly {
        match self.single_term() {
            Some((mono, coeff)) => Poly::from_term(mono.scale_exponents(&rat(-1)), coeff.recip()),
            None => self.base_power(&rat(-1)),
        }
    }

    pub(crate) fn pow_int(&self, n: i64) -> SymbolicResult<Poly> {
        if n == 0 {
            return Ok(Poly::one());
        }
        if self.is_zero() {
            return if n > 0 {
                Ok(Poly::zero())
            } else {
                Err(SymbolicError::DivisionByZero(format!("0^({})", n)))
            };
        }
        if n > 0 {
            return Ok(self.pow_positive(n.unsigned_abs()));
        }
        match self.single_term() {
            Some(_) => Ok(self.invert_term().pow_positive(n.unsigned_abs())),
            None => Ok(self.base_power(&rat(n))),
        }
    }

    pub(crate) fn pow_rational(&self, q: &BigRational) -> SymbolicResult<Poly> {
        if let Some(n) = as_small_int(q) {
            return self.pow_int(n);
        }
        if self.is_zero() {
            return if q.is_positive() {
                Ok(Poly::zero())
            } else {
                Err(SymbolicError::DivisionByZero(format!("0^({})", q)))
            };
        }
        if let Some(c) = self.as_constant() {
            if let Some(value) = exact_rational_power(&c, q) {
                return Ok(Poly::constant(value));
            }
            return Ok(Poly::from_atom_pow(Atom::Base(self.clone()), q.clone()));
        }
        if let Some(atom) = self.as_bare_atom() {
            return Ok(Poly::from_atom_pow(atom.clone(), q.clone()));
        }
        Ok(self.base_power(q))
    }

    /// Rational content and the primitive part, so that `self == content * primitive`
    /// with a positive content. With `fix_sign` the leading coefficient of the primitive
    /// part is made positive and the sign moves into the content.
    fn content_split(&self, fix_sign: bool) -> (BigRational, Poly) {
        let mut numer = BigInt::zero();
        let mut denom = BigInt::one();
        for coeff in self.0.values() {
            numer = numer.gcd(coeff.numer());
            denom = denom.lcm(coeff.denom());
        }
        let mut content = BigRational::new(numer, denom);
        let leading_negative = self.0.values().next().is_some_and(|c| c.is_negative());
        if fix_sign && leading_negative {
            content = -content;
        }
        (content.clone(), self.scale(&content.recip()))
    }

    /// self^q kept as a `Base` atom of the primitive part, for a non-constant `self`
    /// and an exponent that does not expand. The content goes to the coefficient when
    /// its power is rational and to a constant `Base` otherwise.
    fn base_power(&self, q: &BigRational) -> Poly {
        let (content, primitive) = self.content_split(q.is_integer());
        let atom_part = Poly::from_atom_pow(Atom::Base(primitive), q.clone());
        if content.is_one() {
            return atom_part;
        }
        match exact_rational_power(&content, q) {
            Some(value) => atom_part.scale(&value),
            None => atom_part.mul(&Poly::from_atom_pow(
                Atom::Base(Poly::constant(content)),
                q.clone(),
            )),
        }
    }

    pub(crate) fn pow(&self, exp: &Poly) -> SymbolicResult<Poly> {
        if let Some(q) = exp.as_constant() {
            return self.pow_rational(&q);
        }
        if self.is_one() {
            return Ok(Poly::one());
        }
        Ok(Poly::from_atom(Atom::Power(self.clone(), exp.clone())))
    }

    /// func(arg) with the trivial values evaluated
    pub(crate) fn func(func: Function, arg: Poly) -> SymbolicResult<Poly> {
        if arg.is_zero() {
            match func {
                Function::Exp | Function::Cos | Function::Cosh => return Ok(Poly::one()),
                Function::Sin
                | Function::Tg
                | Function::Arcsin
                | Function::Arctg
                | Function::Sinh
                | Function::Tanh => return Ok(Poly::zero()),
                Function::Ln => return Err(SymbolicError::Undefined("ln(0)".to_string())),
                Function::Ctg => return Err(SymbolicError::DivisionByZero("ctg(0)".to_string())),
                Function::Arccos | Function::Arcctg => {}
            }
        }
        if func == Function::Ln && arg.is_one() {
            return Ok(Poly::zero());
        }
        if func == Function::Exp {
            if let Some(Atom::Func(Function::Ln, inner)) = arg.as_bare_atom() {
                return Ok(inner.clone());
            }
        }
        Ok(Poly::from_atom(Atom::Func(func, arg)))
    }

    /// f'(arg) for the outer function of a chain-rule step
    fn func_derivative(func: Function, arg: &Poly) -> SymbolicResult<Poly> {
        let minus_one = rat(-1);
        let arg_squared = arg.mul(arg);
        let derivative = match func {
            Function::Exp => Poly::func(Function::Exp, arg.clone())?,
            Function::Ln => arg.pow_int(-1)?,
            Function::Sin => Poly::func(Function::Cos, arg.clone())?,
            Function::Cos => Poly::func(Function::Sin, arg.clone())?.scale(&minus_one),
            Function::Tg => Poly::func(Function::Cos, arg.clone())?.pow_int(-2)?,
            Function::Ctg => Poly::func(Function::Sin, arg.clone())?
                .pow_int(-2)?
                .scale(&minus_one),
            Function::Arcsin => Poly::one()
                .sub(&arg_squared)
                .pow_rational(&BigRational::new((-1).into(), 2.into()))?,
            Function::Arccos => Poly::one()
                .sub(&arg_squared)
                .pow_rational(&BigRational::new((-1).into(), 2.into()))?
                .scale(&minus_one),
            Function::Arctg => Poly::one().add(&arg_squared).pow_int(-1)?,
            Function::Arcctg => Poly::one()
                .add(&arg_squared)
                .pow_int(-1)?
                .scale(&minus_one),
            Function::Sinh => Poly::func(Function::Cosh, arg.clone())?,
            Function::Cosh => Poly::func(Function::Sinh, arg.clone())?,
            Function::Tanh => Poly::func(Function::Cosh, arg.clone())?.pow_int(-2)?,
        };
        Ok(derivative)
    }

    pub(crate) fn diff(&self, var: &str) -> SymbolicResult<Poly> {
        let mut result = Poly::zero();
        for (mono, coeff) in &self.0 {
            for (atom, exp) in &mono.0 {
                if !atom.contains_variable(var) {
                    continue;
                }
                let inner = atom.diff(var)?;
                if inner.is_zero() {
                    continue;
                }
                let mut rest = mono.0.clone();
                let lowered = exp - BigRational::one();
                if lowered.is_zero() {
                    rest.remove(atom);
                } else {
                    rest.insert(atom.clone(), lowered);
                }
                let outer = Poly::from_term(Monomial(rest), coeff * exp);
                result.absorb(outer.mul(&inner));
            }
        }
        Ok(result)
    }

    /// drops the terms in which the bare variable `var` has an exponent above `max_degree`
    pub(crate) fn truncate_degree(&self, var: &str, max_degree: usize) -> Poly {
        let var_atom = Atom::Var(var.to_string());
        let bound = BigRational::from_integer(BigInt::from(max_degree));
        Poly(
            self.0
                .iter()
                .filter(|(mono, _)| mono.0.get(&var_atom).is_none_or(|exp| *exp <= bound))
                .map(|(mono, coeff)| (mono.clone(), coeff.clone()))
                .collect(),
        )
    }

    pub(crate) fn substitute(&self, var: &str, value: &Poly) -> SymbolicResult<Poly> {
        let mut result = Poly::zero();
        for (mono, coeff) in &self.0 {
            let mut term = Poly::constant(coeff.clone());
            for (atom, exp) in &mono.0 {
                let factor = if atom.contains_variable(var) {
                    atom.substitute(var, value)?.pow_rational(exp)?
                } else {
                    Poly::from_atom_pow(atom.clone(), exp.clone())
                };
                term = term.mul(&factor);
            }
            result.absorb(term);
        }
        Ok(result)
    }

    pub(crate) fn term_to_expr(mono: &Monomial, coeff: &BigRational) -> Expr {
        if mono.0.is_empty() {
            return Expr::Const(coeff.clone());
        }
        let mut numer: Vec<Expr> = Vec::new();
        let mut denom: Vec<Expr> = Vec::new();
        for (atom, exp) in &mono.0 {
            if exp.is_negative() {
                denom.push(power_expr(atom.to_expr(), &-exp));
            } else {
                numer.push(power_expr(atom.to_expr(), exp));
            }
        }
        let c_numer = coeff.numer();
        let numerator = match numer.into_iter().reduce(|acc, f| acc * f) {
            None => integer_expr(c_numer),
            Some(product) if c_numer.is_one() => product,
            Some(product) if *c_numer == -BigInt::one() => -product,
            Some(product) => integer_expr(c_numer) * product,
        };
        let mut denominators = Vec::new();
        if !coeff.denom().is_one() {
            denominators.push(integer_expr(coeff.denom()));
        }
        denominators.extend(denom);
        match denominators.into_iter().reduce(|acc, f| acc * f) {
            None => numerator,
            Some(denominator) => numerator / denominator,
        }
    }

    /// Back to an expression tree: terms in canonical order, negative coefficients as
    /// subtraction.
    pub(crate) fn to_expr(&self) -> Expr {
        let mut result: Option<Expr> = None;
        for (mono, coeff) in &self.0 {
            result = Some(match result {
                None => Poly::term_to_expr(mono, coeff),
                Some(acc) if coeff.is_negative() => acc - Poly::term_to_expr(mono, &-coeff),
                Some(acc) => acc + Poly::term_to_expr(mono, coeff),
            });
        }
        result.unwrap_or_else(|| Expr::int(0))
    }
}

fn integer_expr(n: &BigInt) -> Expr {
    Expr::Const(BigRational::from_integer(n.clone()))
}

fn power_expr(base: Expr, exp: &BigRational) -> Expr {
    if exp.is_one() {
        base
    } else {
        base.pow(Expr::Const(exp.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Poly {
        Poly::from_atom(Atom::Var("x".to_string()))
    }

    fn half() -> BigRational {
        BigRational::new(1.into(), 2.into())
    }

    #[test]
    fn test_square_of_sum_expands() {
        let sum = x().add(&Poly::one());
        let square = sum.pow_int(2).unwrap();
        let expected = x().mul(&x()).add(&x().scale(&rat(2))).add(&Poly::one());
        assert_eq!(square, expected);
    }

    #[test]
    fn test_half_powers_recombine() {
        let sum = x().add(&Poly::one());
        let root = sum.pow_rational(&half()).unwrap();
        assert_eq!(root.mul(&root), sum);
        let inverse_root = sum.pow_rational(&-half()).unwrap();
        assert!(root.mul(&inverse_root).is_one());
    }

    #[test]
    fn test_exact_roots_of_rationals() {
        let four_ninths = Poly::constant(BigRational::new(4.into(), 9.into()));
        assert_eq!(
            four_ninths.pow_rational(&half()).unwrap(),
            Poly::constant(BigRational::new(2.into(), 3.into()))
        );
        let two = Poly::constant(rat(2));
        let root_two = two.pow_rational(&half()).unwrap();
        assert!(root_two.as_constant().is_none());
        assert_eq!(root_two.mul(&root_two), two);
    }

    #[test]
    fn test_zero_to_negative_power_fails() {
        assert!(matches!(
            Poly::zero().pow_int(-1),
            Err(SymbolicError::DivisionByZero(_))
        ));
        assert!(matches!(
            Poly::zero().pow_rational(&-half()),
            Err(SymbolicError::DivisionByZero(_))
        ));
        assert!(Poly::zero().pow_rational(&half()).unwrap().is_zero());
    }

    #[test]
    fn test_trivial_function_values() {
        assert!(Poly::func(Function::Exp, Poly::zero()).unwrap().is_one());
        assert!(Poly::func(Function::Cosh, Poly::zero()).unwrap().is_one());
        assert!(Poly::func(Function::Sin, Poly::zero()).unwrap().is_zero());
        assert!(Poly::func(Function::Ln, Poly::one()).unwrap().is_zero());
        assert!(Poly::func(Function::Ln, Poly::zero()).is_err());
        let ln_x = Poly::func(Function::Ln, x()).unwrap();
        assert_eq!(Poly::func(Function::Exp, ln_x).unwrap(), x());
    }

    #[test]
    fn test_substitute_then_collect() {
        // x^2 + 2x at x = -2 is 0
        let p = x().mul(&x()).add(&x().scale(&rat(2)));
        let at = p.substitute("x", &Poly::constant(rat(-2))).unwrap();
        assert!(at.is_zero());
    }

    #[test]
    fn test_content_leaves_the_base() {
        let x_plus_one = x().add(&Poly::one());
        let root = x_plus_one.pow_rational(&half()).unwrap();
        let four_x_plus_four = x_plus_one.scale(&rat(4));
        assert_eq!(
            four_x_plus_four.pow_rational(&half()).unwrap(),
            root.scale(&rat(2))
        );
        let root_two = Poly::constant(rat(2)).pow_rational(&half()).unwrap();
        assert_eq!(
            x_plus_one.scale(&rat(2)).pow_rational(&half()).unwrap(),
            root_two.mul(&root)
        );
        // 1/(x - 1) and 1/(1 - x) share one atom
        let one_minus_x = Poly::one().sub(&x());
        let inverse = one_minus_x.pow_int(-1).unwrap();
        assert_eq!(
            one_minus_x.scale(&rat(-3)).pow_int(-1).unwrap(),
            inverse.scale(&BigRational::new((-1).into(), 3.into()))
        );
        assert!(inverse.add(&x().sub(&Poly::one()).pow_int(-1).unwrap()).is_zero());
    }

    #[test]
    fn test_diff_of_root_of_sum() {
        // d/dx (x^2 + 1)^(1/2) = x (x^2 + 1)^(-1/2)
        let base = x().mul(&x()).add(&Poly::one());
        let d = base.pow_rational(&half()).unwrap().diff("x").unwrap();
        let expected = x().mul(&base.pow_rational(&-half()).unwrap());
        assert_eq!(d, expected);
    }
}
