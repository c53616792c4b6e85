//! Stlc - runtime-declared algebraic data types and a simply typed term
//! language over them.
//!
//! # Architecture
//!
//! ```text
//! TypeRegistry (declare, add_constructor, check)
//!     │ freeze
//!     ▼
//! Universe ──► make_value / make_free_ref / make_function / parse_dsl
//!     │
//!     ▼
//! evaluate(term, env) ──► Value
//! ```
//!
//! Types are declared on a mutable [`TypeRegistry`]. Once every type is in,
//! the registry is checked and frozen into a [`Universe`], which builds
//! values and terms against it and evaluates them. A `Universe` is cheap to
//! clone and can be shared across threads.

mod universe;

use std::sync::Once;

pub use stlc_dsl::{
    parse, parse_str, parse_value, serialize_term, serialize_value, to_string, DslError,
};
pub use stlc_eval::{
    Branches, Deps, Env, EvalConfig, EvalError, EvalResult, Function, Interpreter,
    InterpreterBuilder, Param, Term, TermKind, Value,
};
pub use stlc_types::{Name, SharedRegistry, TypeDecl, TypeError, TypeRegistry};
pub use universe::Universe;

/// JSON tree of the surface syntax.
pub use serde_json::Value as Json;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=stlc_eval=trace` to follow match dispatch.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
