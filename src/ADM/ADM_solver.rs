//! Adomian Decomposition Method for the Lane-Emden equation
//!
//! ```text
//! u'' + (2/ξ) u' + f(u) = 0,   u(0) = u0,   u'(0) = 0
//! ```
//! The solution is looked for as a series u = u_0 + u_1 + ... with u_0 = u0 and
//! ```text
//! u_{k+1} = -L⁻¹(A_k),   A_k = 1/k! d^k/dλ^k f(Σ_{i≤k} u_i λ^i) |_{λ=0}
//! L⁻¹(g)(ξ) = ∫₀^ξ s⁻² ∫₀^s t² g(t) dt ds
//! ```
//! where A_k are the Adomian polynomials of the nonlinearity and L⁻¹ inverts the
//! spherical operator ξ⁻² d/dξ (ξ² d/dξ).
use crate::ADM::ADM_errors::{AdmError, AdmOperation, AdmResult, StepContext};
use crate::symbolic::symbolic_engine::{Expr, factorial};
use crate::symbolic::symbolic_errors::SymbolicResult;
use log::{debug, info};
use num::BigRational;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

/// Number of series terms, validated to be a positive integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumTerms(usize);

impl NumTerms {
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for NumTerms {
    type Error = AdmError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(AdmError::ConfigError(
                "num_terms must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(NumTerms(value))
    }
}

impl TryFrom<i64> for NumTerms {
    type Error = AdmError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = usize::try_from(value).map_err(|_| {
            AdmError::ConfigError(format!("num_terms must be a positive integer, got {}", value))
        })?;
        NumTerms::try_from(value)
    }
}

impl TryFrom<f64> for NumTerms {
    type Error = AdmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
            return Err(AdmError::ConfigError(format!(
                "num_terms must be a positive integer, got {}",
                value
            )));
        }
        NumTerms::try_from(value as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    Configured,
    Solved,
}

/// k-th Adomian polynomial of `f` with respect to `unknown`, built from the first k + 1
/// components: the k-th Taylor coefficient in `lambda` of f(Σ_{i≤k} components[i]·λ^i).
/// `components` beyond index `k` are ignored.
pub fn adomian_polynomial(
    f: &Expr,
    components: &[Expr],
    unknown: &str,
    lambda: &str,
    k: usize,
) -> AdmResult<Expr> {
    let lam = Expr::var(lambda);
    let partial_sum = components
        .iter()
        .take(k + 1)
        .enumerate()
        .map(|(i, component)| component.clone() * lam.clone().pow(Expr::int(i as i64)))
        .reduce(|acc, term| acc + term)
        .ok_or_else(|| {
            AdmError::ConfigError("adomian polynomial needs at least one component".to_string())
        })?;
    let parametrized = f.substitute_variable(unknown, &partial_sum);
    let derivative = parametrized
        .truncated_diff_n(lambda, k)
        .at_step(k, AdmOperation::Differentiation)?;
    let at_origin = derivative
        .substitute_variable(lambda, &Expr::int(0))
        .simplify()
        .at_step(k, AdmOperation::Substitution)?;
    let k_factorial = Expr::Const(BigRational::from_integer(factorial(k)));
    (at_origin / k_factorial)
        .simplify()
        .at_step(k, AdmOperation::Simplification)
}

/// L⁻¹(f)(ξ) = ∫₀^ξ s⁻² ∫₀^s t² f(t) dt ds with `argument` playing the role of ξ and
/// `s`, `t` the integration variables, which must not occur in `f`.
pub fn inverse_operator(
    f: &Expr,
    argument: &str,
    s: &str,
    t: &str,
) -> SymbolicResult<Expr> {
    let t_var = Expr::var(t);
    let s_var = Expr::var(s);
    let inner_integrand = t_var.clone().pow(Expr::int(2)) * f.rename_variable(argument, t);
    let inner = inner_integrand.definite_integrate(t, &Expr::int(0), &s_var)?;
    let outer_integrand = s_var.pow(Expr::int(-2)) * inner;
    outer_integrand.definite_integrate(s, &Expr::int(0), &Expr::var(argument))
}

/// Dummy variables of one solve: parametrization and the two integration variables.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DummyVariables {
    lambda: String,
    s: String,
    t: String,
}

pub struct AdmSolver {
    pub non_linear_func: Expr, // nonlinearity f(u)
    pub initial_condition: Expr, // u(0)
    pub unknown: String,       // name of the unknown function in f
    pub argument: String,      // independent variable ξ
    num_terms: NumTerms,
    components: Vec<Expr>,
    status: SolverStatus,
    calc_statistics: HashMap<String, usize>,
}

impl AdmSolver {
    /// Solver for the default names: unknown `u` and independent variable `xi`.
    pub fn new<N>(num_terms: N, non_linear_func: Expr, initial_condition: Expr) -> AdmResult<AdmSolver>
    where
        N: TryInto<NumTerms, Error = AdmError>,
    {
        let num_terms = num_terms.try_into()?;
        Ok(AdmSolver {
            non_linear_func,
            initial_condition,
            unknown: "u".to_string(),
            argument: "xi".to_string(),
            num_terms,
            components: Vec::new(),
            status: SolverStatus::Configured,
            calc_statistics: HashMap::new(),
        })
    }

    pub fn with_variables(mut self, unknown: &str, argument: &str) -> AdmResult<AdmSolver> {
        if unknown.is_empty() || argument.is_empty() {
            return Err(AdmError::ConfigError(
                "variable names must not be empty".to_string(),
            ));
        }
        if unknown == argument {
            return Err(AdmError::ConfigError(format!(
                "unknown and independent variable must differ, both are '{}'",
                unknown
            )));
        }
        self.unknown = unknown.to_string();
        self.argument = argument.to_string();
        Ok(self)
    }

    fn dummy_variables(&self) -> DummyVariables {
        let mut taken: HashSet<String> = self
            .non_linear_func
            .all_arguments_are_variables()
            .into_iter()
            .chain(self.initial_condition.all_arguments_are_variables())
            .collect();
        taken.insert(self.unknown.clone());
        taken.insert(self.argument.clone());
        let mut fresh = |hint: &str| {
            let name = Expr::fresh_variable(hint, &taken);
            taken.insert(name.clone());
            name
        };
        let lambda = fresh("lambda");
        let s = fresh("s");
        let t = fresh("t");
        DummyVariables { lambda, s, t }
    }

    /// Runs the recurrence from scratch and returns the unsimplified sum of the
    /// components together with the components themselves.
    pub fn solve(&mut self) -> AdmResult<(Expr, Vec<Expr>)> {
        let begin = Instant::now();
        self.components.clear();
        self.status = SolverStatus::Configured;
        self.calc_statistics.clear();
        let dummies = self.dummy_variables();
        debug!(
            "dummy variables: lambda = {}, s = {}, t = {}",
            dummies.lambda, dummies.s, dummies.t
        );
        info!(
            "solving with f({}) = {}, {}(0) = {}, {} terms",
            self.unknown,
            self.non_linear_func,
            self.unknown,
            self.initial_condition,
            self.num_terms.get()
        );
        let mut components = vec![self.initial_condition.clone()];
        for k in 0..self.num_terms.get() - 1 {
            let step_begin = Instant::now();
            let a_k = adomian_polynomial(
                &self.non_linear_func,
                &components,
                &self.unknown,
                &dummies.lambda,
                k,
            )?;
            debug!("A_{} = {}", k, a_k);
            let integral = inverse_operator(&a_k, &self.argument, &dummies.s, &dummies.t)
                .at_step(k, AdmOperation::Integration)?;
            let next = (-integral)
                .simplify()
                .at_step(k, AdmOperation::Simplification)?;
            info!(
                "u_{} = {} ({} ms)",
                k + 1,
                next,
                step_begin.elapsed().as_millis()
            );
            components.push(next);
        }
        self.components = components;
        self.status = SolverStatus::Solved;
        let elapsed = begin.elapsed();
        self.calc_statistics
            .insert("recurrence steps".to_string(), self.num_terms.get() - 1);
        self.calc_statistics
            .insert("time elapsed, ms".to_string(), elapsed.as_millis() as usize);
        self.calc_statistics();
        let approx_solution = self.approx_solution().unwrap_or_else(|| Expr::int(0));
        Ok((approx_solution, self.components.clone()))
    }

    pub fn components(&self) -> &[Expr] {
        &self.components
    }

    /// u_0 + u_1 + ... + u_{n-1}, left unsimplified; `None` before the first solve
    pub fn approx_solution(&self) -> Option<Expr> {
        if self.status != SolverStatus::Solved {
            return None;
        }
        self.components.iter().cloned().reduce(|acc, c| acc + c)
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms.get()
    }

    pub fn statistics(&self) -> &HashMap<String, usize> {
        &self.calc_statistics
    }

    fn calc_statistics(&mut self) {
        if let Some(last) = self.components.last() {
            self.calc_statistics
                .insert("length of last component".to_string(), last.to_string().len());
        }
        self.calc_statistics
            .insert("number of components".to_string(), self.components.len());
        let mut table = Builder::from(self.calc_statistics.clone()).build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }
}
