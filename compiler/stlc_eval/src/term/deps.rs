//! Free-variable dependency sets.

use std::collections::BTreeMap;
use std::fmt;

use stlc_types::Name;

use crate::{Env, EvalError};

/// Free variables a term needs, each with its required type.
///
/// Sorted by name so display and error reporting are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deps(BTreeMap<Name, Name>);

impl Deps {
    /// No dependencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exactly `{name: ty}`.
    pub fn single(name: Name, ty: Name) -> Self {
        Deps(BTreeMap::from([(name, ty)]))
    }

    /// Union of several dependency sets.
    ///
    /// Fails if a name is required at two different types.
    pub fn union<'a>(parts: impl IntoIterator<Item = &'a Deps>) -> Result<Self, EvalError> {
        let mut out = Deps::new();
        for part in parts {
            for (name, ty) in &part.0 {
                out.insert(name, ty)?;
            }
        }
        Ok(out)
    }

    fn insert(&mut self, name: &Name, ty: &Name) -> Result<(), EvalError> {
        match self.0.get(name) {
            Some(first) if first != ty => Err(EvalError::InconsistentFreeVarType {
                name: name.clone(),
                first: first.clone(),
                second: ty.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.0.insert(name.clone(), ty.clone());
                Ok(())
            }
        }
    }

    /// Drop the given names (used for function parameters).
    #[must_use]
    pub fn without<'a>(mut self, names: impl IntoIterator<Item = &'a Name>) -> Self {
        for name in names {
            self.0.remove(name);
        }
        self
    }

    /// Required type of `name`, if it is a dependency.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Name> {
        self.0.get(name)
    }

    /// Dependencies in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Name)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that `env` binds every dependency to a value of the right type.
    ///
    /// Reports the first offender in name order.
    pub fn check(&self, env: &Env) -> Result<(), EvalError> {
        for (name, ty) in &self.0 {
            match env.get(name.as_str()) {
                Some(value) if value.ty() == ty => {}
                other => {
                    return Err(EvalError::UnsatisfiedDependency {
                        name: name.clone(),
                        expected: ty.clone(),
                        found: other.map(|v| v.ty().clone()),
                    })
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Deps {
    /// `{a:Nat,b:Bool}`, or nothing when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("{")?;
        for (i, (name, ty)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}:{ty}")?;
        }
        f.write_str("}")
    }
}
