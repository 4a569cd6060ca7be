//! Adomian Decomposition Method for Lane-Emden type equations
//! u'' + (2/ξ) u' + f(u) = 0, u(0) = u0, u'(0) = 0
///  Example#1
/// ```
/// use adomian_lane_emden::ADM::ADM_solver::AdmSolver;
/// use adomian_lane_emden::symbolic::symbolic_engine::Expr;
/// // polytrope of index 1: the series of sin(ξ)/ξ
/// let f = Expr::parse_expression("u").unwrap();
/// let mut solver = AdmSolver::new(4usize, f, Expr::int(1)).unwrap();
/// let (approx_solution, components) = solver.solve().unwrap();
/// println!("u(xi) = {}", approx_solution);
/// assert_eq!(components[3].to_string(), "-xi^6/5040");
/// ```
pub mod ADM_solver;
/// errors of the solver and of the task driver
pub mod ADM_errors;
/// batches of problems: built-in examples, TOML task files, parallel runs and reports
///  Example#2
/// ```
/// use adomian_lane_emden::ADM::ADM_task::{AdmTask, render_outcome, run_batch};
/// let tasks = vec![
///     AdmTask::new("isothermal sphere", "exp(u)", "0", 3),
///     AdmTask::new("broken", "u", "1", 0),
/// ];
/// for outcome in run_batch(&tasks, false) {
///     println!("{}", render_outcome(&outcome));
/// }
/// ```
pub mod ADM_task;

mod ADM_tests;
