use lpadapt_highs::HighsBackend;
use lpadapt_model::{
    ConstraintBound, LinearConstraint, LinearExpression, LinearProgram, Variable, VariableBound,
};
use lpadapt_solver::{SolveStatus, Solver, SolverConfig, SolverError, solve_with};
use tracing::Level;

const TOL: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Scenario: x in [0, 10], maximize x.
#[test]
fn test_bounded_maximization() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::continuous().with_bounds(0.0, 10.0).unwrap())
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.values().len(), 1);
    assert!((solution.values()[0] - 10.0).abs() < TOL);
    assert!((solution.objective_value().unwrap() - 10.0).abs() < TOL);
    assert_eq!(solution.backend(), "highs");
}

/// Scenario: x, y >= 0, x + y <= 4, x >= 5.
#[test]
fn test_infeasible_program() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    let y = program.add_variable(Variable::continuous()).unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0), (y, 1.0)], ConstraintBound::Upper(4.0))
                .unwrap(),
        )
        .unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0)], ConstraintBound::Lower(5.0)).unwrap(),
        )
        .unwrap();
    program.minimize(LinearExpression::var(x)).unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert_eq!(solution.status(), SolveStatus::Infeasible);
    assert!(solution.values().is_empty());
    assert_eq!(
        solution.into_values(),
        Err(SolverError::SolveFailure {
            status: SolveStatus::Infeasible
        })
    );
}

/// Scenario: x >= 0, maximize x.
#[test]
fn test_unbounded_program() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    // Presolve may report unbounded-or-infeasible, which also classifies as
    // unbounded.
    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert_eq!(solution.status(), SolveStatus::Unbounded);
    assert!(solution.values().is_empty());
}

/// Scenario: no variables at all.
#[test]
fn test_empty_program() {
    init_tracing();
    let program = LinearProgram::new();

    let result = solve_with(&HighsBackend::new(), &program, &SolverConfig::new());

    assert_eq!(result, Err(SolverError::EmptyModel));
}

/// Scenario: binary b, b <= 1, maximize b.
#[test]
fn test_binary_maximization() {
    init_tracing();
    let mut program = LinearProgram::new();
    let b = program.add_variable(Variable::binary()).unwrap();
    program
        .add_constraint(
            LinearConstraint::at_most(
                lpadapt_model::CoefficientMap::from_terms([(b, 1.0)]).unwrap(),
                1.0,
            )
            .unwrap(),
        )
        .unwrap();
    program.maximize(LinearExpression::var(b)).unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert!((solution.value(b).unwrap() - 1.0).abs() < TOL);
}

/// minimize 2x + 3y subject to x + y >= 5, x, y >= 0
#[test]
fn test_simple_lp() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    let y = program.add_variable(Variable::continuous()).unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0), (y, 1.0)], ConstraintBound::Lower(5.0))
                .unwrap(),
        )
        .unwrap();
    program
        .minimize(LinearExpression::from_terms([(x, 2.0), (y, 3.0)]).unwrap())
        .unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert!(
        (solution.objective_value().unwrap() - 10.0).abs() < TOL,
        "Expected objective value 10.0, got {:?}",
        solution.objective_value()
    );
    assert!((solution.value(x).unwrap() - 5.0).abs() < TOL);
}

/// maximize x + y subject to 1 <= x - y <= 2, x + y <= 6
#[test]
fn test_ranged_row() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    let y = program.add_variable(Variable::continuous()).unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms(
                [(x, 1.0), (y, -1.0)],
                ConstraintBound::Double {
                    lower: 1.0,
                    upper: 2.0,
                },
            )
            .unwrap(),
        )
        .unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0), (y, 1.0)], ConstraintBound::Upper(6.0))
                .unwrap(),
        )
        .unwrap();
    program
        .maximize(
            LinearExpression::from_terms([(x, 1.0), (y, 1.0)])
                .unwrap()
                .with_constant(1.0)
                .unwrap(),
        )
        .unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert!((solution.objective_value().unwrap() - 7.0).abs() < TOL);
    assert!(program.is_feasible(solution.values(), TOL));
}

/// maximize integer x subject to x <= 1.5
#[test]
fn test_integer_variable_solution() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::integer().with_bounds(0.0, 10.0).unwrap())
        .unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0)], ConstraintBound::Upper(1.5)).unwrap(),
        )
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert!((solution.value(x).unwrap() - 1.0).abs() < TOL);
}

#[test]
fn test_default_bound_applies_to_unbounded_columns() {
    init_tracing();
    let mut program = LinearProgram::with_default_bound(VariableBound::Double {
        lower: 0.0,
        upper: 1.0,
    })
    .unwrap();
    let x = program.add_variable(Variable::continuous()).unwrap();
    let y = program
        .add_variable(Variable::continuous().with_bounds(0.0, 3.0).unwrap())
        .unwrap();
    program
        .maximize(LinearExpression::from_terms([(x, 1.0), (y, 1.0)]).unwrap())
        .unwrap();

    let solution = solve_with(&HighsBackend::new(), &program, &SolverConfig::new()).unwrap();

    assert!((solution.value(x).unwrap() - 1.0).abs() < TOL);
    assert!((solution.value(y).unwrap() - 3.0).abs() < TOL);
}

#[test]
fn test_solver_applies_options() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::continuous().with_bounds(0.0, 2.0).unwrap())
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let mut solver = Solver::new(HighsBackend::new());
    solver.set_time_limit(10.0);
    solver.set_presolve(false);
    solver.set_threads(1);
    solver.set_tolerance(1e-7);

    let solution = solver.solve(&program).unwrap();
    assert!((solution.value(x).unwrap() - 2.0).abs() < TOL);
}
