//! Runtime values.
//!
//! A [`Value`] is a constructor tag applied to already-evaluated argument
//! values, together with the name of the type it belongs to. Every value is
//! validated against its [`TypeDecl`](stlc_types::TypeDecl) when it is built,
//! so a `Value` in hand is always well-typed.

mod heap;

use std::fmt;

use stlc_stack::ensure_sufficient_stack;
use stlc_types::{Name, TypeRegistry};

use crate::EvalError;

pub use heap::Heap;

/// A closed, fully evaluated instance of a declared type.
///
/// Equality is structural: same type, same tag, pairwise-equal arguments.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Value {
    ty: Name,
    tag: Name,
    args: Heap<Vec<Value>>,
}

impl Value {
    /// Build a value of `ty` using constructor `tag`.
    ///
    /// Checks that the constructor exists, that the argument count matches
    /// its signature, and that each argument's type is exactly the declared
    /// one (by name).
    pub fn new(
        registry: &TypeRegistry,
        ty: &str,
        tag: &str,
        args: Vec<Value>,
    ) -> Result<Self, EvalError> {
        let decl = registry.get(ty)?;
        let signature = decl.constructor(tag)?;

        if args.len() != signature.len() {
            return Err(EvalError::ArityMismatch {
                ty: decl.name().clone(),
                tag: Name::new(tag),
                expected: signature.len(),
                got: args.len(),
            });
        }

        for (index, (arg, expected)) in args.iter().zip(signature).enumerate() {
            if arg.ty != *expected {
                return Err(EvalError::ArgTypeMismatch {
                    ty: decl.name().clone(),
                    tag: Name::new(tag),
                    index,
                    expected: expected.clone(),
                    got: arg.ty.clone(),
                });
            }
        }

        Ok(Value {
            ty: decl.name().clone(),
            tag: Name::new(tag),
            args: Heap::new(args),
        })
    }

    /// Name of the value's type.
    #[inline]
    pub fn ty(&self) -> &Name {
        &self.ty
    }

    /// Constructor tag.
    #[inline]
    pub fn tag(&self) -> &Name {
        &self.tag
    }

    /// Constructor arguments, in signature order.
    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Whether this value was built with `ty.tag`.
    #[inline]
    pub fn is(&self, ty: &str, tag: &str) -> bool {
        self.ty == *ty && self.tag == *tag
    }
}

impl fmt::Display for Value {
    /// `Nat.next<Nat.zero>`; nullary constructors print without brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "{}.{}", self.ty, self.tag)?;
            if self.args.is_empty() {
                return Ok(());
            }
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")
        })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({self})")
    }
}
