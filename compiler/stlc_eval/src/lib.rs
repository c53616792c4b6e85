#![deny(clippy::arithmetic_side_effects)]
//! Stlc Eval - values, terms and the evaluator.
//!
//! # Architecture
//!
//! - [`Value`]: a closed, validated constructor application
//! - [`Term`]: an open expression annotated with its result type and its
//!   free-variable dependencies ([`Deps`])
//! - [`Function`]: parameters plus a body; only ever used as a term, never
//!   as a runtime value
//! - [`Env`]: persistent name -> value map, copied on extension
//! - [`Interpreter`]: evaluates terms against a frozen registry
//!
//! Evaluation is plain environment passing. Nothing is substituted and the
//! caller's environment is never modified, so one set of terms can be
//! evaluated from several threads with independent environments.

mod env;
mod error;
pub mod interpreter;
mod term;
mod value;

pub use env::Env;
pub use error::EvalError;
pub use interpreter::{EvalConfig, Interpreter, InterpreterBuilder};
pub use term::{Branches, Deps, Function, Param, Term, TermKind};
pub use value::{Heap, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;
