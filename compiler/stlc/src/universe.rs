//! One-stop construction and evaluation against a frozen registry.

use serde_json::Value as Json;
use stlc_dsl::DslError;
use stlc_eval::{
    Branches, Env, EvalConfig, EvalError, EvalResult, Function, Interpreter, Term, Value,
};
use stlc_types::{SharedRegistry, TypeDecl, TypeError, TypeRegistry};

/// A checked set of types together with an interpreter for them.
///
/// Every constructor of values and terms validates against the same
/// registry the interpreter evaluates with, so anything built here can be
/// evaluated here.
#[derive(Clone, Debug)]
pub struct Universe {
    interpreter: Interpreter,
}

impl Universe {
    /// Check and freeze `registry` with the default configuration.
    pub fn new(registry: TypeRegistry) -> Result<Self, EvalError> {
        Self::with_config(registry, EvalConfig::default())
    }

    /// Freeze `registry` and evaluate with `config`.
    pub fn with_config(registry: TypeRegistry, config: EvalConfig) -> Result<Self, EvalError> {
        let interpreter = Interpreter::builder(registry.freeze())
            .config(config)
            .build()?;
        Ok(Universe { interpreter })
    }

    #[inline]
    pub fn registry(&self) -> &SharedRegistry {
        self.interpreter.registry()
    }

    #[inline]
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Re-run the registry consistency check.
    pub fn check_consistency(&self) -> Result<(), TypeError> {
        self.registry().check()
    }

    pub fn lookup_type(&self, name: &str) -> Result<&TypeDecl, TypeError> {
        self.registry().get(name)
    }

    pub fn make_value(&self, ty: &str, tag: &str, args: Vec<Value>) -> Result<Value, EvalError> {
        Value::new(self.registry(), ty, tag, args)
    }

    pub fn make_free_ref(&self, name: &str, ty: &str) -> Result<Term, EvalError> {
        Term::free(self.registry(), name, ty)
    }

    pub fn make_construct(&self, ty: &str, tag: &str, args: Vec<Term>) -> Result<Term, EvalError> {
        Term::construct(self.registry(), ty, tag, args)
    }

    /// A function over `(name, type)` parameters.
    pub fn make_function(&self, params: &[(&str, &str)], body: Term) -> Result<Function, EvalError> {
        Function::from_pairs(self.registry(), params, body)
    }

    pub fn make_match(
        &self,
        ty: &str,
        scrutinee: Term,
        branches: Branches,
    ) -> Result<Term, EvalError> {
        Term::match_on(self.registry(), ty, scrutinee, branches)
    }

    /// Parse surface syntax into a term.
    pub fn parse_dsl(&self, json: &Json) -> Result<Term, DslError> {
        stlc_dsl::parse(self.registry(), json)
    }

    /// Read a value from its canonical form.
    pub fn parse_value(&self, json: &Json) -> Result<Value, DslError> {
        stlc_dsl::parse_value(self.registry(), json)
    }

    pub fn evaluate(&self, term: &Term, env: &Env) -> EvalResult {
        self.interpreter.evaluate(term, env)
    }

    pub fn apply(&self, func: &Function, env: &Env, args: &[Value]) -> EvalResult {
        self.interpreter.apply(func, env, args)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests unwrap setup results")]
mod tests;
