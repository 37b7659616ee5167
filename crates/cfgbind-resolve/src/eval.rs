use cfgbind_core::{Configuration, Guard};

use crate::error::ResolveError;

/// Evaluates a guard with unassigned flags read as undefined.
pub fn evaluate(guard: &Guard, config: &Configuration) -> bool {
    match guard {
        Guard::Defined(flag) => config.is_defined(flag),
        Guard::Not(inner) => !evaluate(inner, config),
        Guard::All(children) => children.iter().all(|c| evaluate(c, config)),
        Guard::Any(children) => children.iter().any(|c| evaluate(c, config)),
    }
}

/// Guard evaluator with an optional strict mode.
///
/// In strict mode every flag a guard mentions must be assigned by the configuration, whether or
/// not short-circuiting would have reached it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    strict: bool,
}

impl Evaluator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn evaluate(&self, guard: &Guard, config: &Configuration) -> Result<bool, ResolveError> {
        if self.strict {
            if let Some(flag) = guard.flags().into_iter().find(|f| config.get(f).is_none()) {
                return Err(ResolveError::UnknownFlag(flag.to_string()));
            }
        }
        Ok(evaluate(guard, config))
    }

    /// An absent guard is always active.
    pub fn evaluate_opt(
        &self,
        guard: Option<&Guard>,
        config: &Configuration,
    ) -> Result<bool, ResolveError> {
        match guard {
            Some(guard) => self.evaluate(guard, config),
            None => Ok(true),
        }
    }
}
