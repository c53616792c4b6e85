//! Registry for user-declared algebraic types.
//!
//! # Design
//!
//! - Dual indexing: `FxHashMap` for O(1) lookup, `BTreeSet` of names for
//!   sorted iteration
//! - Constructors live in a `BTreeMap`, so tag enumeration is sorted
//! - Setup is mutable; evaluation only ever sees a frozen [`SharedRegistry`]

// Arc is the sharing mechanism of SharedRegistry.
#![expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedRegistry thread-safety"
)]

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Name, TypeError};

/// A declared algebraic type: a name plus constructor signatures.
///
/// Argument types are stored by name and are not resolved until
/// [`TypeRegistry::check`] runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    name: Name,
    constructors: BTreeMap<Name, Vec<Name>>,
}

impl TypeDecl {
    fn new(name: Name) -> Self {
        TypeDecl {
            name,
            constructors: BTreeMap::new(),
        }
    }

    /// The type name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Add a constructor with its argument type names.
    ///
    /// Returns `self` so declarations chain:
    /// `decl.add_constructor("zero", &[]).add_constructor("next", &["Nat"])`.
    /// Re-adding a tag replaces its signature.
    pub fn add_constructor(&mut self, tag: impl Into<Name>, args: &[&str]) -> &mut Self {
        let tag = tag.into();
        let args: Vec<Name> = args.iter().copied().map(Name::from).collect();
        tracing::trace!(ty = %self.name, %tag, arity = args.len(), "add constructor");
        self.constructors.insert(tag, args);
        self
    }

    /// Signature of the constructor `tag`.
    pub fn constructor(&self, tag: &str) -> Result<&[Name], TypeError> {
        self.constructors
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| TypeError::UnknownConstructor {
                ty: self.name.clone(),
                tag: Name::new(tag),
            })
    }

    /// Whether a constructor `tag` exists.
    #[inline]
    pub fn has_constructor(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Constructor tags in lexicographic order.
    pub fn constructors(&self) -> impl Iterator<Item = &Name> {
        self.constructors.keys()
    }

    /// Constructors with their signatures, in tag order.
    pub fn signatures(&self) -> impl Iterator<Item = (&Name, &[Name])> {
        self.constructors.iter().map(|(tag, args)| (tag, args.as_slice()))
    }

    /// Number of constructors.
    #[inline]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether the type has no constructors (and therefore no values).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

/// The set of declared types.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    /// Declarations by name.
    types: FxHashMap<Name, TypeDecl>,
    /// Declared names, sorted.
    names: BTreeSet<Name>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new type with no constructors yet.
    ///
    /// Returns the declaration so constructors can be chained onto it.
    pub fn declare(&mut self, name: impl Into<Name>) -> Result<&mut TypeDecl, TypeError> {
        let name = name.into();
        if !Name::is_identifier(name.as_str()) {
            return Err(TypeError::InvalidName { name });
        }
        if self.types.contains_key(&name) {
            return Err(TypeError::DuplicateType { name });
        }
        tracing::debug!(ty = %name, "declare type");
        self.names.insert(name.clone());
        Ok(self
            .types
            .entry(name.clone())
            .or_insert_with(|| TypeDecl::new(name)))
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Result<&TypeDecl, TypeError> {
        self.types.get(name).ok_or_else(|| TypeError::UnknownType {
            name: Name::new(name),
        })
    }

    /// Mutable lookup, for adding constructors after declaration.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut TypeDecl, TypeError> {
        self.types.get_mut(name).ok_or_else(|| TypeError::UnknownType {
            name: Name::new(name),
        })
    }

    /// Check if a type with the given name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Verify that every tag is an identifier and every constructor
    /// argument names a declared type.
    ///
    /// Types, tags and argument positions are visited in sorted order, so
    /// the reported error is deterministic.
    #[tracing::instrument(level = "debug", skip(self), fields(types = self.len()))]
    pub fn check(&self) -> Result<(), TypeError> {
        for decl in self.iter() {
            for (tag, args) in decl.signatures() {
                if !Name::is_identifier(tag.as_str()) {
                    return Err(TypeError::InvalidName { name: tag.clone() });
                }
                for (index, arg) in args.iter().enumerate() {
                    if !self.contains(arg.as_str()) {
                        return Err(TypeError::UnknownConstructorArgType {
                            ty: decl.name.clone(),
                            tag: tag.clone(),
                            index,
                            arg: arg.clone(),
                        });
                    }
                }
            }
        }
        tracing::debug!("registry is consistent");
        Ok(())
    }

    /// Iterate over declarations in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.names.iter().filter_map(|name| self.types.get(name))
    }

    /// Declared type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.names.iter()
    }

    /// Number of declared types.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no types are declared.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Freeze the registry into a shareable handle.
    pub fn freeze(self) -> SharedRegistry {
        SharedRegistry::new(self)
    }
}

/// Frozen, reference-counted registry.
///
/// Terms, values and interpreters built from the same `SharedRegistry`
/// can be used from several threads at once; nothing mutates it.
#[derive(Clone, Debug)]
pub struct SharedRegistry(Arc<TypeRegistry>);

impl SharedRegistry {
    /// Wrap a registry.
    pub fn new(registry: TypeRegistry) -> Self {
        SharedRegistry(Arc::new(registry))
    }
}

impl Deref for SharedRegistry {
    type Target = TypeRegistry;

    #[inline]
    fn deref(&self) -> &TypeRegistry {
        &self.0
    }
}

impl AsRef<TypeRegistry> for SharedRegistry {
    #[inline]
    fn as_ref(&self) -> &TypeRegistry {
        &self.0
    }
}
