#![cfg(feature = "serde")]
#![allow(clippy::float_cmp)]

use lpadapt_model::{
    ConstraintBound, LinearProgram, ModelError, Sense, VariableBound, VariableDomain, VariableId,
};

const DIET: &str = r#"{
    "variables": [
        { "domain": "continuous", "bound": { "double": { "lower": 0.0, "upper": 10.0 } }, "name": "x" },
        { "domain": "integer" },
        { "domain": "binary" }
    ],
    "objective": {
        "sense": "maximize",
        "expression": { "coefficients": { "0": 1.0, "2": 3.5 }, "constant": 2.0 }
    },
    "constraints": [
        { "coefficients": { "0": 1.0, "1": 1.0 }, "bound": { "upper": 4.0 }, "name": "cap" },
        { "coefficients": { "1": 2.0 }, "bound": { "double": { "lower": 1.0, "upper": 3.0 } } }
    ]
}"#;

#[test]
fn test_document_parses_into_validated_program() {
    let program: LinearProgram = serde_json::from_str(DIET).expect("valid document");

    assert_eq!(program.num_variables(), 3);
    assert_eq!(program.num_constraints(), 2);
    assert_eq!(program.default_bound(), VariableBound::Lower(0.0));
    assert_eq!(program.variables()[0].name(), Some("x"));
    assert_eq!(program.variables()[1].domain(), VariableDomain::Integer);
    assert_eq!(program.variables()[1].bound(), None);
    assert_eq!(program.objective().sense, Sense::Maximize);
    assert_eq!(program.objective().constant(), 2.0);
    assert_eq!(
        program.objective().coefficients().get(VariableId::new(2)),
        3.5
    );
    assert_eq!(program.constraints()[0].bound(), ConstraintBound::Upper(4.0));
    assert_eq!(program.constraints()[0].name(), Some("cap"));
}

#[test]
fn test_document_with_out_of_range_coefficient_is_rejected() {
    let document = r#"{
        "variables": [{ "domain": "continuous" }],
        "constraints": [{ "coefficients": { "0": 1.0, "3": 1.0 }, "bound": { "lower": 0.0 } }]
    }"#;
    let err = serde_json::from_str::<LinearProgram>(document).unwrap_err();
    assert!(err.to_string().contains("VARIABLE_INVALID_ID"));
}

#[test]
fn test_document_with_inverted_bounds_is_rejected() {
    let document = r#"{
        "variables": [{ "domain": "continuous", "bound": { "double": { "lower": 2.0, "upper": 1.0 } } }]
    }"#;
    let err = serde_json::from_str::<LinearProgram>(document).unwrap_err();
    assert!(err.to_string().contains("VARIABLE_INVALID_BOUNDS"));
}

#[test]
fn test_document_with_non_finite_coefficient_is_rejected() {
    let err = lpadapt_model::CoefficientMap::from_terms([(VariableId::new(0), f64::NAN)])
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidCoefficient { .. }));
}

#[test]
fn test_program_survives_serialization() {
    let program: LinearProgram = serde_json::from_str(DIET).expect("valid document");
    let json = serde_json::to_string(&program).expect("serializable");
    let reparsed: LinearProgram = serde_json::from_str(&json).expect("reparsable");
    assert_eq!(program, reparsed);
}
