//! Function terms and their parameters.

use std::fmt;

use rustc_hash::FxHashSet;
use stlc_types::{Name, TypeError, TypeRegistry};

use super::{Deps, Term};
use crate::EvalError;

/// A typed parameter binding, `name: Type`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    name: Name,
    ty: Name,
}

impl Param {
    /// Create a parameter; the name must be an identifier and the type
    /// must be declared.
    pub fn new(
        registry: &TypeRegistry,
        name: impl Into<Name>,
        ty: &str,
    ) -> Result<Self, EvalError> {
        let name = name.into();
        if !Name::is_identifier(name.as_str()) {
            return Err(TypeError::InvalidName { name }.into());
        }
        let ty = registry.get(ty)?.name().clone();
        Ok(Param { name, ty })
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &Name {
        &self.ty
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)
    }
}

/// Ordered parameters plus a body.
///
/// The declared type of a function is the type of its body; the parameter
/// types are only its [`signature`](Function::signature). Functions are
/// applied by the [`Interpreter`](crate::Interpreter) and never become values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    params: Vec<Param>,
    body: Box<Term>,
    deps: Deps,
}

impl Function {
    /// Build a function over `body`.
    ///
    /// Parameter names must be distinct, and a parameter must have the same
    /// type the body uses it at. The function's dependencies are the body's
    /// minus the parameters.
    pub fn new(params: Vec<Param>, body: Term) -> Result<Self, EvalError> {
        let mut seen = FxHashSet::default();
        for param in &params {
            if !seen.insert(param.name.as_str()) {
                return Err(EvalError::MalformedParameterList {
                    name: param.name.clone(),
                });
            }
            if let Some(used) = body.deps().get(param.name.as_str()) {
                if *used != param.ty {
                    return Err(EvalError::InconsistentFreeVarType {
                        name: param.name.clone(),
                        first: param.ty.clone(),
                        second: used.clone(),
                    });
                }
            }
        }

        let deps = body.deps().clone().without(params.iter().map(Param::name));
        Ok(Function {
            params,
            body: Box::new(body),
            deps,
        })
    }

    /// Build a function from `(name, type)` pairs.
    pub fn from_pairs(
        registry: &TypeRegistry,
        params: &[(&str, &str)],
        body: Term,
    ) -> Result<Self, EvalError> {
        let params = params
            .iter()
            .map(|&(name, ty)| Param::new(registry, name, ty))
            .collect::<Result<Vec<_>, _>>()?;
        Function::new(params, body)
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn body(&self) -> &Term {
        &self.body
    }

    /// Declared type, which is the body's type.
    #[inline]
    pub fn ty(&self) -> &Name {
        self.body.ty()
    }

    /// Free variables not bound by the parameters.
    #[inline]
    pub fn deps(&self) -> &Deps {
        &self.deps
    }

    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameter types in order.
    pub fn signature(&self) -> impl ExactSizeIterator<Item = &Name> {
        self.params.iter().map(Param::ty)
    }
}
