//! Declaration errors.

use crate::Name;

/// Errors raised while declaring types or checking the registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A type with this name is already registered.
    #[error("duplicate type name: {name}")]
    DuplicateType { name: Name },

    /// A type, tag or variable name is not made of word characters.
    #[error("invalid name '{name}': expected letters, digits or '_'")]
    InvalidName { name: Name },

    /// No type with this name is registered.
    #[error("unknown type name: {name}")]
    UnknownType { name: Name },

    /// The type exists but has no constructor with this tag.
    #[error("unknown constructor {ty}.{tag}")]
    UnknownConstructor { ty: Name, tag: Name },

    /// A constructor signature refers to an undeclared type.
    #[error("unknown type '{arg}' used in constructor '{ty}.{tag}' at argument {index}")]
    UnknownConstructorArgType {
        ty: Name,
        tag: Name,
        index: usize,
        arg: Name,
    },
}
