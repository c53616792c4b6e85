//! Immutable identifiers.
//!
//! Type names, constructor tags and variable names all share this
//! representation. Cloning is a reference count bump, comparison is by
//! content, and ordering is lexicographic so sorted listings are stable.

// Arc<str> is the whole representation; there is no interner to index into.
#![expect(
    clippy::disallowed_types,
    reason = "Arc<str> is the shared representation of Name"
)]

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::TypeError;

/// Shared immutable identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Name(Arc<str>);

impl Name {
    /// Create a name from any string-like value.
    #[inline]
    pub fn new(s: impl AsRef<str>) -> Self {
        Name(Arc::from(s.as_ref()))
    }

    /// Create a name that must be an identifier, see [`Name::is_identifier`].
    pub fn identifier(s: impl AsRef<str>) -> Result<Self, TypeError> {
        let s = s.as_ref();
        if Self::is_identifier(s) {
            Ok(Name::new(s))
        } else {
            Err(TypeError::InvalidName { name: Name::new(s) })
        }
    }

    /// One or more ASCII word characters (`[A-Za-z0-9_]+`).
    ///
    /// Every type, tag and variable name has this shape, which is what the
    /// surface syntax can read back.
    pub fn is_identifier(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }

    /// View the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    #[inline]
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    #[inline]
    fn from(s: String) -> Self {
        Name(Arc::from(s))
    }
}

impl From<&Name> for Name {
    #[inline]
    fn from(n: &Name) -> Self {
        n.clone()
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
