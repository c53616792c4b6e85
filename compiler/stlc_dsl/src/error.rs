//! Syntax errors.

use stlc_eval::EvalError;
use stlc_types::TypeError;

/// Errors from reading the surface syntax.
///
/// Terms that parse but fail to build (unknown types, non-exhaustive
/// matches and so on) are reported as [`DslError::Eval`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DslError {
    #[error("don't know how to parse {head}")]
    UnrecognizedSyntax { head: String },

    #[error("argument does not match 'name: Type': {literal}")]
    MalformedFreeVarLiteral { literal: String },

    #[error("function body must have 1 element, got {got}")]
    FunctionBody { got: usize },

    #[error("invalid JSON: {message}")]
    Json { message: String },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<TypeError> for DslError {
    fn from(err: TypeError) -> Self {
        DslError::Eval(err.into())
    }
}

impl From<serde_json::Error> for DslError {
    fn from(err: serde_json::Error) -> Self {
        DslError::Json {
            message: err.to_string(),
        }
    }
}
