//! Stlc DSL - surface syntax and canonical form.
//!
//! The surface syntax is nested JSON arrays and strings:
//!
//! | Form                                   | Term            |
//! |----------------------------------------|-----------------|
//! | `"name: Type"`                         | free variable   |
//! | `["Type.tag", arg, ...]`               | constructor     |
//! | `[["x: Type", ...], body]`             | function        |
//! | `["Type<-apply", function, arg, ...]`  | application     |
//! | `["Type<-match", scrutinee, {tag: function, ...}]` | match |
//!
//! [`serialize_term`] writes the same forms back (free variables without
//! the space, `"name:Type"`), and `parse(serialize_term(t)) == t` for every
//! term. Values serialize to their constructor form, which is also a valid
//! closed term.

mod error;
mod parse;
mod serialize;

pub use error::DslError;
pub use parse::{parse, parse_str, parse_value};
pub use serialize::{serialize_term, serialize_value, to_string};
