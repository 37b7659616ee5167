//! A policy for classifying and emitting errors.
//!
//! Libraries should not log errors they return; they hand back [`crate::Result`] and let the
//! application install an `ErrorPolicy` to decide how to present or route them.
//!
//! Example
//! ```rust,ignore
//! use cfgbind_error::{ErrorPolicy, Severity, Error};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn classify(&self, e: &Error) -> Severity { e.severity() }
//!     fn emit(&self, e: &Error) { eprintln!("[{:?}] {e}", self.classify(e)); }
//! }
//! ```
use super::{Error, Severity};

pub trait ErrorPolicy: Send + Sync {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity;

    /// Emit the error according to the policy (e.g., log, collect, print)
    fn emit(&self, error: &Error);
}

/// A no-operation policy that does nothing
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, _error: &Error) {}
}

/// A policy that uses the error's default severity and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        use tracing::{Level, event};

        match error.severity() {
            Severity::Warning => event!(Level::WARN, error = %error),
            Severity::Error | Severity::Fatal => event!(Level::ERROR, error = %error),
        }
    }
}

/// A composite policy that delegates to multiple policies.
///
/// - classify: the highest severity among inner policies (the error's own severity when empty).
/// - emit: delegates to all inner policies in insertion order.
#[derive(Default)]
pub struct CombinedPolicy {
    policies: Vec<Box<dyn ErrorPolicy>>,
}

impl CombinedPolicy {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Add a policy by value. Consumes and returns Self for builder-style chaining.
    pub fn push<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Box::new(policy));
        self
    }
}

impl ErrorPolicy for CombinedPolicy {
    fn classify(&self, error: &Error) -> Severity {
        self.policies
            .iter()
            .map(|p| p.classify(error))
            .max()
            .unwrap_or_else(|| error.severity())
    }

    fn emit(&self, error: &Error) {
        for p in &self.policies {
            p.emit(error);
        }
    }
}
