//! Value, term and evaluation errors.
//!
//! Declaration errors from the registry pass through unchanged as
//! [`EvalError::Type`].

use stlc_types::{Name, TypeError};

/// Everything that can go wrong building values and terms or evaluating.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Type(#[from] TypeError),

    // Value construction
    #[error("{ty}.{tag} expects {expected} {}, got {got}", plural(.expected))]
    ArityMismatch {
        ty: Name,
        tag: Name,
        expected: usize,
        got: usize,
    },
    #[error("arg type {got} != {expected} in {ty}.{tag}[{index}]")]
    ArgTypeMismatch {
        ty: Name,
        tag: Name,
        index: usize,
        expected: Name,
        got: Name,
    },

    // Term construction
    #[error("inconsistent free var types: {name} is used as both {first} and {second}")]
    InconsistentFreeVarType {
        name: Name,
        first: Name,
        second: Name,
    },
    #[error("no mapping found in pattern match for {ty}.{missing}")]
    NonExhaustiveMatch { ty: Name, missing: Name },
    #[error(
        "branch for {ty}.{tag} takes ({}) but the constructor has ({})",
        join(.got),
        join(.expected)
    )]
    BranchSignatureMismatch {
        ty: Name,
        tag: Name,
        expected: Vec<Name>,
        got: Vec<Name>,
    },
    #[error("result type mismatch: expected {expected}, got {got}")]
    ResultTypeMismatch { expected: Name, got: Name },
    #[error("malformed parameter list: {name} is bound more than once")]
    MalformedParameterList { name: Name },
    #[error("parameter {param} has type {expected}, argument has type {got}")]
    ParamTypeMismatch {
        param: Name,
        expected: Name,
        got: Name,
    },

    // Evaluation
    #[error("unsatisfied dependency {name}: expected {expected}, {}", found_msg(.found.as_ref()))]
    UnsatisfiedDependency {
        name: Name,
        expected: Name,
        found: Option<Name>,
    },
    #[error("bad arguments: function takes {expected} {}, got {got}", plural(.expected))]
    ArgumentListTypeError { expected: usize, got: usize },
    #[error("maximum evaluation depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

fn join(names: &[Name]) -> String {
    names.iter().map(Name::as_str).collect::<Vec<_>>().join(", ")
}

fn found_msg(found: Option<&Name>) -> String {
    match found {
        Some(ty) => format!("found {ty}"),
        None => "not bound".to_string(),
    }
}
