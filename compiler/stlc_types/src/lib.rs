//! Stlc Types - declared algebraic data types.
//!
//! This crate owns the type side of the runtime:
//! - [`Name`]: shared immutable identifiers for types, tags and variables
//! - [`TypeDecl`]: a named type with its constructor signatures
//! - [`TypeRegistry`]: the set of declared types and the consistency check
//! - [`SharedRegistry`]: a frozen, reference-counted registry handle
//!
//! Signatures may refer to types that are not declared yet, which is what
//! makes recursive and mutually recursive types possible. The dangling
//! references are caught by [`TypeRegistry::check`].

mod error;
mod name;
mod registry;

pub use error::TypeError;
pub use name::Name;
pub use registry::{SharedRegistry, TypeDecl, TypeRegistry};
