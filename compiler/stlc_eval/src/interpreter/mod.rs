//! The evaluator.
//!
//! `eval` is one recursive function dispatched on [`TermKind`]. It threads
//! an [`Env`] down the tree, creating child environments at function
//! application, and builds [`Value`]s at constructor nodes. Nothing is
//! mutated and nothing is retried; the first error aborts the evaluation.

mod builder;

use stlc_stack::ensure_sufficient_stack;
use stlc_types::SharedRegistry;

use crate::{Env, EvalError, EvalResult, Function, Term, TermKind, Value};

pub use builder::{EvalConfig, InterpreterBuilder};

/// Evaluates terms against a frozen registry.
///
/// Holds no per-evaluation state, so one interpreter can serve many
/// threads.
#[derive(Clone, Debug)]
pub struct Interpreter {
    registry: SharedRegistry,
    config: EvalConfig,
}

impl Interpreter {
    /// Interpreter with the default configuration.
    ///
    /// Fails if the registry has dangling constructor argument types.
    pub fn new(registry: SharedRegistry) -> Result<Self, EvalError> {
        InterpreterBuilder::new(registry).build()
    }

    /// Start configuring an interpreter.
    pub fn builder(registry: SharedRegistry) -> InterpreterBuilder {
        InterpreterBuilder::new(registry)
    }

    #[inline]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate `term` under `env`.
    ///
    /// The dependency set is checked against `env` first, so a missing or
    /// mistyped variable is reported before any work is done.
    #[tracing::instrument(level = "debug", skip_all, fields(term = %term))]
    pub fn evaluate(&self, term: &Term, env: &Env) -> EvalResult {
        term.check_deps(env)?;
        self.eval(term, env, 0)
    }

    /// Apply `func` to already evaluated `args` under `env`.
    ///
    /// The parameters are bound positionally in a child of `env`.
    pub fn apply(&self, func: &Function, env: &Env, args: &[Value]) -> EvalResult {
        self.apply_at(func, env, args, 0)
    }

    fn eval(&self, term: &Term, env: &Env, depth: usize) -> EvalResult {
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(EvalError::RecursionLimit { limit });
            }
        }
        ensure_sufficient_stack(|| self.eval_inner(term, env, depth))
    }

    fn eval_inner(&self, term: &Term, env: &Env, depth: usize) -> EvalResult {
        let next = depth.saturating_add(1);
        match term.kind() {
            TermKind::Free { name } => match env.get(name.as_str()) {
                Some(value) if value.ty() == term.ty() => Ok(value.clone()),
                other => Err(EvalError::UnsatisfiedDependency {
                    name: name.clone(),
                    expected: term.ty().clone(),
                    found: other.map(|v| v.ty().clone()),
                }),
            },
            TermKind::Construct { tag, args } => {
                let values = self.eval_all(args, env, next)?;
                Value::new(&self.registry, term.ty().as_str(), tag.as_str(), values)
            }
            TermKind::Function(func) => self.apply_at(func, env, &[], depth),
            TermKind::Apply { func, args } => {
                let values = self.eval_all(args, env, next)?;
                self.apply_at(func, env, &values, depth)
            }
            TermKind::Match {
                scrutinee,
                branches,
            } => {
                let value = self.eval(scrutinee, env, next)?;
                let branch =
                    branches
                        .get(value.tag())
                        .ok_or_else(|| EvalError::NonExhaustiveMatch {
                            ty: value.ty().clone(),
                            missing: value.tag().clone(),
                        })?;
                tracing::trace!(ty = %value.ty(), tag = %value.tag(), "match branch");
                self.apply_at(branch, env, value.args(), depth)
            }
        }
    }

    fn eval_all(&self, terms: &[Term], env: &Env, depth: usize) -> Result<Vec<Value>, EvalError> {
        terms.iter().map(|t| self.eval(t, env, depth)).collect()
    }

    /// `depth` is that of the applying term; the body runs one level below.
    fn apply_at(&self, func: &Function, env: &Env, args: &[Value], depth: usize) -> EvalResult {
        if args.len() != func.arity() {
            return Err(EvalError::ArgumentListTypeError {
                expected: func.arity(),
                got: args.len(),
            });
        }
        let child = env.extend(func.params(), args);
        self.eval(func.body(), &child, depth.saturating_add(1))
    }
}
