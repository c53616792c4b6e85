//! Evaluation environments.
//!
//! An [`Env`] maps free-variable names to values. Extending it produces a
//! child copy; the parent is left untouched. The map is persistent
//! (`im::HashMap`), so the copy shares structure with its parent and costs
//! O(log n) per binding rather than a full clone.

use stlc_types::Name;

use crate::term::Param;
use crate::Value;

/// Immutable mapping from variable name to value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Env {
    bindings: im::HashMap<Name, Value>,
}

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Whether `name` is bound.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// A child environment with `name` bound to `value`.
    ///
    /// An existing binding of `name` is shadowed in the child only.
    #[must_use]
    pub fn bind(&self, name: impl Into<Name>, value: Value) -> Self {
        Env {
            bindings: self.bindings.update(name.into(), value),
        }
    }

    /// A child environment with each parameter bound positionally.
    ///
    /// Callers check the lengths; extra values or parameters are ignored.
    #[must_use]
    pub(crate) fn extend(&self, params: &[Param], values: &[Value]) -> Self {
        let mut bindings = self.bindings.clone();
        for (param, value) in params.iter().zip(values) {
            bindings.insert(param.name().clone(), value.clone());
        }
        Env { bindings }
    }

    /// Number of bindings.
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variables are bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.bindings.iter()
    }
}

impl<N: Into<Name>> FromIterator<(N, Value)> for Env {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Env {
            bindings: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}
