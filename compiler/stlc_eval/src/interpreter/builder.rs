//! `InterpreterBuilder` and evaluation settings.

use stlc_types::SharedRegistry;

use super::Interpreter;
use crate::EvalError;

/// Evaluation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum nesting depth of evaluation. `None` means unlimited; a
    /// self-applying program then simply does not terminate.
    pub max_depth: Option<usize>,
    /// Run the registry consistency check when building the interpreter.
    pub check_registry: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: None,
            check_registry: true,
        }
    }
}

/// Builder for [`Interpreter`].
///
/// ```text
/// let interp = Interpreter::builder(registry).max_depth(10_000).build()?;
/// ```
pub struct InterpreterBuilder {
    registry: SharedRegistry,
    config: EvalConfig,
}

impl InterpreterBuilder {
    /// Start from the default configuration.
    pub fn new(registry: SharedRegistry) -> Self {
        InterpreterBuilder {
            registry,
            config: EvalConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Limit evaluation depth.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.config.max_depth = Some(limit);
        self
    }

    /// Whether to check the registry on [`build`](Self::build).
    #[must_use]
    pub fn check_registry(mut self, check: bool) -> Self {
        self.config.check_registry = check;
        self
    }

    /// Build the interpreter, checking the registry unless disabled.
    pub fn build(self) -> Result<Interpreter, EvalError> {
        if self.config.check_registry {
            self.registry.check()?;
        }
        tracing::debug!(config = ?self.config, types = self.registry.len(), "interpreter ready");
        Ok(Interpreter {
            registry: self.registry,
            config: self.config,
        })
    }
}
