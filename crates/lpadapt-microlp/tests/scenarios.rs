#![allow(clippy::float_cmp)]

use lpadapt_microlp::MicrolpBackend;
use lpadapt_model::{
    CoefficientMap, ConstraintBound, LinearConstraint, LinearExpression, LinearProgram, Variable,
    VariableBound,
};
use lpadapt_solver::{SolveStatus, SolverConfig, SolverError, solve_with};
use tracing::Level;

const TOL: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn solve(program: &LinearProgram) -> lpadapt_solver::Solution {
    solve_with(&MicrolpBackend::new(), program, &SolverConfig::new()).unwrap()
}

#[test]
fn test_bounded_maximization() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::continuous().with_bounds(0.0, 10.0).unwrap())
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.values().len(), 1);
    assert!((solution.values()[0] - 10.0).abs() < TOL);
    assert_eq!(solution.backend(), "microlp");
}

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

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Infeasible);
    assert!(solution.values().is_empty());
    assert_eq!(solution.objective_value(), None);
}

#[test]
fn test_unbounded_program() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Unbounded);
    assert!(solution.values().is_empty());
    assert_eq!(
        solution.into_values(),
        Err(SolverError::SolveFailure {
            status: SolveStatus::Unbounded
        })
    );
}

#[test]
fn test_empty_program() {
    init_tracing();
    let result = solve_with(
        &MicrolpBackend::new(),
        &LinearProgram::new(),
        &SolverConfig::new(),
    );
    assert_eq!(result, Err(SolverError::EmptyModel));
}

#[test]
fn test_binary_maximization() {
    init_tracing();
    let mut program = LinearProgram::new();
    let b = program.add_variable(Variable::binary()).unwrap();
    program
        .add_constraint(
            LinearConstraint::at_most(CoefficientMap::from_terms([(b, 1.0)]).unwrap(), 1.0)
                .unwrap(),
        )
        .unwrap();
    program.maximize(LinearExpression::var(b)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.values(), &[1.0]);
}

#[test]
fn test_no_constraints_optimizes_each_variable() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::continuous().with_bounds(-2.0, 3.0).unwrap())
        .unwrap();
    let y = program
        .add_variable(Variable::continuous().with_bounds(-4.0, 1.0).unwrap())
        .unwrap();
    let z = program
        .add_variable(
            Variable::integer()
                .with_bound(VariableBound::Fixed(7.0))
                .unwrap(),
        )
        .unwrap();
    program
        .maximize(LinearExpression::from_terms([(x, 1.0), (y, -1.0), (z, 2.0)]).unwrap())
        .unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert!((solution.value(x).unwrap() - 3.0).abs() < TOL);
    assert!((solution.value(y).unwrap() + 4.0).abs() < TOL);
    assert_eq!(solution.value(z), Some(7.0));
    assert!((solution.objective_value().unwrap() - 21.0).abs() < TOL);
}

#[test]
fn test_ranged_constraint_splits_into_two_rows() {
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

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert!((solution.objective_value().unwrap() - 7.0).abs() < TOL);
    assert!(program.is_feasible(solution.values(), TOL));
}

#[test]
fn test_integer_variable_rounds_down_to_feasible() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::integer().with_bounds(0.0, 10.0).unwrap())
        .unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 2.0)], ConstraintBound::Upper(3.0)).unwrap(),
        )
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.value(x), Some(1.0));
}

#[test]
fn test_equality_constraint() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::continuous()).unwrap();
    let y = program.add_variable(Variable::continuous()).unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0), (y, 2.0)], ConstraintBound::Fixed(8.0))
                .unwrap(),
        )
        .unwrap();
    program
        .minimize(LinearExpression::from_terms([(x, 1.0), (y, 1.0)]).unwrap())
        .unwrap();

    let solution = solve(&program);

    assert!((solution.value(x).unwrap()).abs() < TOL);
    assert!((solution.value(y).unwrap() - 4.0).abs() < TOL);
}

#[test]
fn test_options_are_accepted() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::continuous().with_bounds(0.0, 1.0).unwrap())
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();
    let config = SolverConfig::new().with_time_limit(5.0).with_threads(2);

    let solution = solve_with(&MicrolpBackend::new(), &program, &config).unwrap();

    assert!(solution.is_optimal());
}

#[test]
fn test_unbounded_integer_program() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::integer()).unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Unbounded);
    assert!(solution.values().is_empty());
}

#[test]
fn test_open_integer_column_bounded_by_row() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program.add_variable(Variable::integer()).unwrap();
    program
        .add_constraint(
            LinearConstraint::from_terms([(x, 1.0)], ConstraintBound::Upper(4.5)).unwrap(),
        )
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let solution = solve(&program);

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.value(x), Some(4.0));
}

#[test]
fn test_integer_bound_beyond_i32_is_rejected() {
    init_tracing();
    let mut program = LinearProgram::new();
    let x = program
        .add_variable(Variable::integer().with_bounds(0.0, 1e10).unwrap())
        .unwrap();
    program.maximize(LinearExpression::var(x)).unwrap();

    let err = solve_with(&MicrolpBackend::new(), &program, &SolverConfig::new()).unwrap_err();

    assert!(matches!(err, SolverError::BackendInitFailure(_)));
}
