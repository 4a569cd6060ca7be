#[cfg(test)]
mod tests {
    use crate::ADM::ADM_errors::{AdmError, AdmOperation};
    use crate::ADM::ADM_solver::{AdmSolver, SolverStatus, adomian_polynomial};
    use crate::ADM::ADM_task::{AdmTask, TaskFile, TermsValue, render_outcome, run_batch};
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbolic::symbolic_errors::SymbolicError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(input: &str) -> Expr {
        Expr::parse_expression(input).unwrap()
    }

    fn simplified(inputs: &[&str]) -> Vec<Expr> {
        inputs
            .iter()
            .map(|s| parse(s).simplify().unwrap())
            .collect()
    }

    fn solve(f: &str, u0: &str, num_terms: usize) -> Vec<Expr> {
        let mut solver = AdmSolver::new(num_terms, parse(f), parse(u0)).unwrap();
        let (_, components) = solver.solve().unwrap();
        components
    }

    #[test]
    fn test_reference_problem_two_terms() {
        let components = solve("(u^2 - C)^1.5", "1", 2);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], Expr::int(1));
        assert_eq!(
            components[1],
            parse("-(1 - C)^1.5*xi^2/6").simplify().unwrap()
        );
    }

    fn reference_components_up_to_u2(components: &[Expr], argument: &str) {
        assert_eq!(components.len(), 3);
        assert_eq!(components[0], Expr::int(1));
        let u1 = format!("-(1 - C)^(3/2)*{}^2/6", argument);
        let u2 = format!("(1 - C)^2*{}^4/40", argument);
        assert_eq!(components[1], parse(&u1).simplify().unwrap());
        assert_eq!(components[2], parse(&u2).simplify().unwrap());
    }

    #[test]
    fn test_reference_problem_three_terms() {
        // A_1 = 3 (1 - C)^(1/2) u_1, so u_2 carries (1 - C)^2 expanded
        reference_components_up_to_u2(&solve("(u^2 - C)^1.5", "1", 3), "xi");
        assert_ne!(
            solve("(u^2 - C)^1.5", "1", 2)[1],
            solve("(u^2 - C)^1", "1", 2)[1]
        );
    }

    #[test]
    fn test_builtin_reference_task() {
        let mut task = AdmTask::default_tasks()[0].clone();
        assert_eq!(task.nonlinearity, "(u^2 - C)^1.5");
        task.num_terms = TermsValue::Integer(3);
        let outcome = task.run();
        let (_, components) = outcome.result.as_ref().unwrap();
        reference_components_up_to_u2(components, "xi");
    }

    #[test]
    fn test_sample_task_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tasks/lane_emden.toml");
        let file = TaskFile::from_file(path).unwrap();
        assert_eq!(file.tasks.len(), 4);
        assert!(file.tasks.iter().all(|task| task.is_ok()));

        let mut reference = file.tasks[0].as_ref().unwrap().clone();
        reference.num_terms = TermsValue::Integer(3);
        let (_, components) = reference.run().result.unwrap();
        reference_components_up_to_u2(&components, "xi");

        let mut white_dwarf = file.tasks[3].as_ref().unwrap().clone();
        white_dwarf.num_terms = TermsValue::Integer(3);
        let (_, components) = white_dwarf.run().result.unwrap();
        reference_components_up_to_u2(&components, "r");
    }

    #[test]
    fn test_first_component_is_initial_condition_as_given() {
        // not simplified
        let u0 = parse("1 + 0*C");
        let mut solver = AdmSolver::new(3usize, parse("u^2"), u0.clone()).unwrap();
        let (_, components) = solver.solve().unwrap();
        assert_eq!(components[0], u0);
        assert_eq!(components.len(), 3);
    }

    #[test]
    fn test_truncation_consistency() {
        let short = solve("(u^2 - C)^1.5", "1", 3);
        let long = solve("(u^2 - C)^1.5", "1", 4);
        assert_eq!(long.len(), 4);
        assert_eq!(&long[..3], &short[..]);
    }

    #[test]
    fn test_single_term() {
        let mut solver = AdmSolver::new(1usize, parse("exp(u)"), parse("C")).unwrap();
        let (approx, components) = solver.solve().unwrap();
        assert_eq!(components, vec![parse("C")]);
        assert_eq!(approx, parse("C"));
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(
            AdmSolver::new(0usize, parse("u"), Expr::int(1)),
            Err(AdmError::ConfigError(_))
        ));
        assert!(matches!(
            AdmSolver::new(-3i64, parse("u"), Expr::int(1)),
            Err(AdmError::ConfigError(_))
        ));
        assert!(matches!(
            AdmSolver::new(2.5f64, parse("u"), Expr::int(1)),
            Err(AdmError::ConfigError(_))
        ));
    }

    #[test]
    fn test_linear_nonlinearity_reproduces_components() {
        let components = solve("u", "1", 3);
        for (k, component) in components.iter().enumerate() {
            let a_k = adomian_polynomial(&parse("u"), &components, "u", "lambda", k).unwrap();
            assert_eq!(a_k, component.simplify().unwrap(), "k = {}", k);
        }
    }

    #[test]
    fn test_polytrope_n1_is_sinc_series() {
        let components = solve("u", "1", 4);
        let expected = simplified(&["1", "-xi^2/6", "xi^4/120", "-xi^6/5040"]);
        assert_eq!(components, expected);
    }

    #[test]
    fn test_polytrope_n0() {
        let components = solve("u^0", "1", 3);
        assert_eq!(components, simplified(&["1", "-xi^2/6", "0"]));
    }

    #[test]
    fn test_polytrope_n5() {
        let components = solve("u^5", "1", 3);
        assert_eq!(components, simplified(&["1", "-xi^2/6", "xi^4/24"]));
    }

    #[test]
    fn test_isothermal_sphere() {
        let components = solve("exp(u)", "0", 3);
        assert_eq!(components, simplified(&["0", "-xi^2/6", "xi^4/120"]));
    }

    #[test]
    fn test_sine_nonlinearity_keeps_exact_constants() {
        let components = solve("sin(u)", "1", 2);
        assert_eq!(components[1], parse("-sin(1)*xi^2/6").simplify().unwrap());
    }

    #[test]
    fn test_approx_solution_is_unsimplified_sum() {
        let mut solver = AdmSolver::new(3usize, parse("u"), Expr::int(1)).unwrap();
        let (approx, components) = solver.solve().unwrap();
        let expected = components[0].clone() + components[1].clone() + components[2].clone();
        assert_eq!(approx, expected);
        assert_eq!(solver.approx_solution(), Some(expected));
        assert_eq!(
            approx.simplify().unwrap(),
            parse("1 - xi^2/6 + xi^4/120").simplify().unwrap()
        );
    }

    #[test]
    fn test_solve_twice_gives_same_result() {
        let mut solver = AdmSolver::new(3usize, parse("(u^2 - C)^1.5"), Expr::int(1)).unwrap();
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();
        assert_eq!(first, second);
        assert_eq!(solver.components().len(), 3);
        assert_eq!(solver.status(), SolverStatus::Solved);
    }

    #[test]
    fn test_custom_variable_names() {
        let mut solver = AdmSolver::new(3usize, parse("y"), Expr::int(1))
            .unwrap()
            .with_variables("y", "x")
            .unwrap();
        let (_, components) = solver.solve().unwrap();
        assert_eq!(components, simplified(&["1", "-x^2/6", "x^4/120"]));
    }

    #[test]
    fn test_caller_symbols_named_like_dummies() {
        // free symbols called s, t and lambda must survive the integrations
        let components = solve("s*t*lambda", "1", 2);
        assert_eq!(components[1], parse("-s*t*lambda*xi^2/6").simplify().unwrap());
    }

    #[test]
    fn test_log_of_zero_fails_at_first_step() {
        let mut solver = AdmSolver::new(3usize, parse("ln(u)"), Expr::int(0)).unwrap();
        match solver.solve() {
            Err(AdmError::SymbolicComputation { step, .. }) => assert_eq!(step, 0),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(solver.status(), SolverStatus::Configured);
    }

    #[test]
    fn test_integral_without_closed_form() {
        let mut solver = AdmSolver::new(2usize, parse("u"), parse("exp(xi^2)")).unwrap();
        let err = solver.solve().unwrap_err();
        match &err {
            AdmError::SymbolicComputation {
                step,
                operation,
                source,
            } => {
                assert_eq!(*step, 0);
                assert_eq!(*operation, AdmOperation::Integration);
                assert!(matches!(source, SymbolicError::NoClosedForm { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().contains("integration"));
    }

    #[test]
    fn test_batch_tolerates_bad_configuration() {
        let mut tasks = vec![
            AdmTask::new("n = 1", "u", "1", 3),
            AdmTask::new("zero terms", "u", "1", 0),
            AdmTask::new("isothermal", "exp(u)", "0", 3),
            AdmTask::new("bad expression", "u^", "1", 3),
        ];
        tasks[0].num_terms = TermsValue::Float(3.0);
        for parallel in [false, true] {
            let outcomes = run_batch(&tasks, parallel);
            assert_eq!(outcomes.len(), 4);
            assert!(outcomes[0].is_solved());
            assert!(matches!(outcomes[1].result, Err(AdmError::ConfigError(_))));
            assert!(outcomes[2].is_solved());
            assert!(matches!(outcomes[3].result, Err(AdmError::ConfigError(_))));
            assert_eq!(outcomes[2].name, "isothermal");
        }
    }

    #[test]
    fn test_default_tasks_are_valid() {
        let tasks = AdmTask::default_tasks();
        assert_eq!(tasks.len(), 7);
        assert_eq!(tasks[0].nonlinearity, "(u^2 - C)^1.5");
        assert_eq!(tasks[0].num_terms, TermsValue::Integer(7));
        for task in &tasks {
            let solver = task.solver().unwrap();
            assert_eq!(solver.status(), SolverStatus::Configured);
        }
        // the cheap ones are solved outright
        let outcomes = run_batch(&tasks[1..], true);
        assert!(outcomes.iter().all(|o| o.is_solved()));
    }

    #[test]
    fn test_render_outcome() {
        let outcome = AdmTask::new("n = 1", "u", "1", 2).run();
        let text = render_outcome(&outcome);
        assert!(text.starts_with("n = 1"));
        assert!(text.contains("u_k(xi)"));
        assert!(text.contains("-xi^2/6"));
        assert!(text.contains("u(xi) ≈ 1 - xi^2/6\n"));
        let three = AdmTask::new("n = 1", "u", "1", 3).run();
        assert!(render_outcome(&three).contains("u(xi) ≈ 1 - xi^2/6 + xi^4/120\n"));
        let failed = AdmTask::new("broken", "u", "1", 0).run();
        assert!(render_outcome(&failed).contains("Configuration error"));
    }

    const TASK_FILE: &str = r#"
[settings]
loglevel = "warn"
parallel = true

[[task]]
name = "polytrope n = 5"
nonlinearity = "u^5"
initial_condition = 1
num_terms = 3

[[task]]
name = "no nonlinearity"
initial_condition = "1"
num_terms = 3
argument = "r"

[[task]]
name = "text terms"
nonlinearity = "exp(y)"
initial_condition = "0"
num_terms = "three"
unknown = "y"

[[task]]
nonlinearity = "cosh(u)"
initial_condition = "0"
num_terms = 2
argument = "r"
"#;

    #[test]
    fn test_task_file_from_str() {
        let file = TaskFile::from_toml_str(TASK_FILE).unwrap();
        assert_eq!(file.settings.loglevel, "warn");
        assert!(file.settings.parallel);
        assert_eq!(file.tasks.len(), 4);
        let first = file.tasks[0].as_ref().unwrap();
        assert_eq!(first.initial_condition, "1");
        assert_eq!(first.unknown, "u");
        let malformed = file.tasks[1].as_ref().unwrap_err();
        assert_eq!(malformed.name, "no nonlinearity");
        assert_eq!(malformed.argument, "r");
        assert!(matches!(malformed.error, AdmError::ConfigError(_)));
        let third = file.tasks[2].as_ref().unwrap();
        assert!(matches!(third.num_terms, TermsValue::Other(_)));
        assert_eq!(third.unknown, "y");
        let fourth = file.tasks[3].as_ref().unwrap();
        assert_eq!(fourth.name, "task #4");
        assert_eq!(fourth.argument, "r");
    }

    #[test]
    fn test_task_file_run_keeps_order() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TASK_FILE.as_bytes()).unwrap();
        let tasks = TaskFile::from_file(file.path()).unwrap();
        let outcomes = tasks.run();
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[0].is_solved());
        assert!(matches!(outcomes[1].result, Err(AdmError::ConfigError(_))));
        assert_eq!(outcomes[1].argument, "r");
        assert!(render_outcome(&outcomes[1]).starts_with("no nonlinearity: "));
        assert!(matches!(outcomes[2].result, Err(AdmError::ConfigError(_))));
        assert_eq!(outcomes[2].argument, "xi");
        let (_, components) = outcomes[3].result.as_ref().unwrap();
        assert_eq!(components[1], parse("-r^2/6").simplify().unwrap());
    }

    #[test]
    fn test_task_file_errors() {
        assert!(TaskFile::from_toml_str("[settings\nloglevel = 1").is_err());
        assert!(TaskFile::from_toml_str("[settings]\nparallel = \"yes\"").is_err());
        assert!(TaskFile::from_file("/nonexistent/tasks.toml").is_err());
        let empty = TaskFile::from_toml_str("").unwrap();
        assert!(empty.tasks.is_empty());
        assert_eq!(empty.settings.loglevel, "info");
    }
}
