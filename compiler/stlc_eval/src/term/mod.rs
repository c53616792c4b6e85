//! Terms: open, typed expressions.
//!
//! Every [`Term`] knows its declared result type and its dependency set,
//! the free variables it needs with their types. Both are computed once,
//! when the term is built, and the builders reject terms whose parts
//! disagree about a variable's type.
//!
//! Constructor arguments are not type-checked here. They are checked when
//! the evaluator turns them into a [`Value`], which is also where arity
//! errors surface.

mod deps;
mod function;

use std::collections::BTreeMap;
use std::fmt;
use std::iter;

use stlc_stack::ensure_sufficient_stack;
use stlc_types::{Name, TypeError, TypeRegistry};

use crate::{Env, EvalError, Value};

pub use deps::Deps;
pub use function::{Function, Param};

/// Match branches, one function per constructor tag.
pub type Branches = BTreeMap<Name, Function>;

/// An open expression with its type and free-variable dependencies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    ty: Name,
    deps: Deps,
    kind: TermKind,
}

/// The shape of a term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermKind {
    /// Free variable; the term's type is the variable's type.
    Free { name: Name },
    /// Constructor applied to argument terms.
    Construct { tag: Name, args: Vec<Term> },
    /// A function literal. Evaluating it applies it to no arguments.
    Function(Function),
    /// Function applied to argument terms.
    Apply { func: Function, args: Vec<Term> },
    /// Case analysis on the scrutinee's constructor tag.
    Match {
        scrutinee: Box<Term>,
        branches: Branches,
    },
}

impl Term {
    /// A free variable `name` of type `ty`.
    ///
    /// The name must be an identifier.
    pub fn free(
        registry: &TypeRegistry,
        name: impl Into<Name>,
        ty: &str,
    ) -> Result<Self, EvalError> {
        let name = name.into();
        if !Name::is_identifier(name.as_str()) {
            return Err(TypeError::InvalidName { name }.into());
        }
        let ty = registry.get(ty)?.name().clone();
        Ok(Term {
            deps: Deps::single(name.clone(), ty.clone()),
            ty,
            kind: TermKind::Free { name },
        })
    }

    /// The constructor `ty.tag` applied to `args`.
    ///
    /// The type and tag must exist; argument count and types are checked
    /// at evaluation time.
    pub fn construct(
        registry: &TypeRegistry,
        ty: &str,
        tag: &str,
        args: Vec<Term>,
    ) -> Result<Self, EvalError> {
        let decl = registry.get(ty)?;
        decl.constructor(tag)?;
        let tag = Name::identifier(tag)?;
        let deps = Deps::union(args.iter().map(Term::deps))?;
        Ok(Term {
            ty: decl.name().clone(),
            deps,
            kind: TermKind::Construct { tag, args },
        })
    }

    /// Lift a value into a closed constructor term.
    pub fn constant(value: &Value) -> Self {
        ensure_sufficient_stack(|| Term {
            ty: value.ty().clone(),
            deps: Deps::new(),
            kind: TermKind::Construct {
                tag: value.tag().clone(),
                args: value.args().iter().map(Term::constant).collect(),
            },
        })
    }

    /// A function literal as a term.
    pub fn function(func: Function) -> Self {
        Term {
            ty: func.ty().clone(),
            deps: func.deps().clone(),
            kind: TermKind::Function(func),
        }
    }

    /// Apply `func` to `args`.
    ///
    /// The argument count and each argument's declared type must match the
    /// function's parameters.
    pub fn apply(func: Function, args: Vec<Term>) -> Result<Self, EvalError> {
        if args.len() != func.arity() {
            return Err(EvalError::ArgumentListTypeError {
                expected: func.arity(),
                got: args.len(),
            });
        }
        for (param, arg) in func.params().iter().zip(&args) {
            if arg.ty != *param.ty() {
                return Err(EvalError::ParamTypeMismatch {
                    param: param.name().clone(),
                    expected: param.ty().clone(),
                    got: arg.ty.clone(),
                });
            }
        }

        let deps = Deps::union(iter::once(func.deps()).chain(args.iter().map(Term::deps)))?;
        Ok(Term {
            ty: func.ty().clone(),
            deps,
            kind: TermKind::Apply { func, args },
        })
    }

    /// Match on `scrutinee`, producing a value of type `ty`.
    ///
    /// There must be exactly one branch per constructor of the scrutinee's
    /// type, each taking that constructor's argument types as parameters and
    /// returning `ty`.
    pub fn match_on(
        registry: &TypeRegistry,
        ty: &str,
        scrutinee: Term,
        branches: Branches,
    ) -> Result<Self, EvalError> {
        let ty = registry.get(ty)?.name().clone();
        let decl = registry.get(scrutinee.ty.as_str())?;

        for (tag, signature) in decl.signatures() {
            let branch = branches
                .get(tag)
                .ok_or_else(|| EvalError::NonExhaustiveMatch {
                    ty: decl.name().clone(),
                    missing: tag.clone(),
                })?;
            if !branch.signature().eq(signature) {
                return Err(EvalError::BranchSignatureMismatch {
                    ty: decl.name().clone(),
                    tag: tag.clone(),
                    expected: signature.to_vec(),
                    got: branch.signature().cloned().collect(),
                });
            }
            if *branch.ty() != ty {
                return Err(EvalError::ResultTypeMismatch {
                    expected: ty,
                    got: branch.ty().clone(),
                });
            }
        }
        if let Some(extra) = branches.keys().find(|tag| !decl.has_constructor(tag.as_str())) {
            return Err(TypeError::UnknownConstructor {
                ty: decl.name().clone(),
                tag: extra.clone(),
            }
            .into());
        }

        let deps = Deps::union(
            iter::once(scrutinee.deps()).chain(branches.values().map(Function::deps)),
        )?;
        Ok(Term {
            ty,
            deps,
            kind: TermKind::Match {
                scrutinee: Box::new(scrutinee),
                branches,
            },
        })
    }

    /// Declared result type.
    #[inline]
    pub fn ty(&self) -> &Name {
        &self.ty
    }

    /// Free variables and their required types.
    #[inline]
    pub fn deps(&self) -> &Deps {
        &self.deps
    }

    #[inline]
    pub fn kind(&self) -> &TermKind {
        &self.kind
    }

    /// Whether the term has no free variables.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.deps.is_empty()
    }

    /// Type and dependencies, `Nat{foo:Nat}<...>`, whatever the kind.
    pub fn describe(&self) -> String {
        format!("{}{}<...>", self.ty, self.deps)
    }

    /// Check `env` against the dependency set without evaluating.
    pub fn check_deps(&self, env: &Env) -> Result<(), EvalError> {
        self.deps.check(env)
    }
}

impl From<Function> for Term {
    fn from(func: Function) -> Self {
        Term::function(func)
    }
}

impl fmt::Display for Term {
    /// `foo:Nat` for a free variable, `Nat{foo:Nat}<...>` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::Free { name } => write!(f, "{name}:{}", self.ty),
            _ => f.write_str(&self.describe()),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests unwrap setup results")]
mod tests;
