#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use adomian_lane_emden::symbolic::symbolic_engine::Expr;
/// let input = "(u^2 - C)^1.5 + exp(-xi)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.to_string(), "(u^2 - C)^(3/2) + exp(-xi)");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) keeps the expression tree with exact rational constants and elementary functions
/// 2) substitutes, renames and inspects variables
/// 3) prints expressions with the minimal number of brackets
///# Example#
/// ```
/// use adomian_lane_emden::symbolic::symbolic_engine::Expr;
/// let u = Expr::var("u");
/// let xi = Expr::var("xi");
/// let f = u.clone().pow(Expr::int(2)) + xi.clone();
/// // substitute u -> 1 - xi^2/6
/// let g = f.substitute_variable("u", &(Expr::int(1) - xi.clone().pow(Expr::int(2)) / Expr::int(6)));
/// assert!(!g.contains_variable("u"));
/// assert!(g.contains_variable("xi"));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// analytical derivatives: `diff` for one step and `diff_n` for derivatives of any order
///# Example#
/// ```
/// use adomian_lane_emden::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x^3 + exp(2*x)").unwrap();
/// let d2 = f.diff_n("x", 2).unwrap();
/// assert_eq!(d2, Expr::parse_expression("6*x + 4*exp(2*x)").unwrap().simplify().unwrap());
/// ```
pub mod symbolic_engine_derivatives;
/// error type shared by the whole symbolic engine
pub mod symbolic_errors;
///______________________________________________________________________________________________________________________________________________
/// expanded sum-of-products form with exact coefficients, used by simplification,
/// differentiation of high order and integration
/// _____________________________________________________________________________________________________________________________________________
pub(crate) mod symbolic_canonical;
/// term-by-term antiderivatives and definite integrals with symbolic bounds
///# Example#
/// ```
/// use adomian_lane_emden::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("t^2").unwrap();
/// let integral = f.definite_integrate("t", &Expr::int(0), &Expr::var("s")).unwrap();
/// assert_eq!(integral.to_string(), "s^3/3");
/// ```
pub mod symbolic_integration;
/// algebraic simplification
pub mod symbolic_simplify;
