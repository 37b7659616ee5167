use super::{ErrorPolicy, Result, Severity};

/// Extension trait for `Result` enabling policy-driven emission without
/// contaminating core control-flow with side-effects.
///
/// Example
/// ```rust,ignore
/// use cfgbind_error::{Result, ResultExt, TracingPolicy};
///
/// fn run(policy: &TracingPolicy) -> Result<()> {
///     resolve_everything().emit_error(policy) // still Err for the caller to handle
/// }
/// ```
pub trait ResultExt<T> {
    /// Emit the error using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as a warning, emit it
    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as an error, emit it
    fn emit_error(self, policy: &impl ErrorPolicy) -> Self;

    /// If the result is an error classified as fatal, emit it
    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, Severity::Warning)
    }

    fn emit_error(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, Severity::Error)
    }

    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, Severity::Fatal)
    }
}

fn emit_if<T>(result: Result<T>, policy: &impl ErrorPolicy, severity: Severity) -> Result<T> {
    if let Err(ref e) = result {
        if policy.classify(e) == severity {
            policy.emit(e);
        }
    }
    result
}

/// Iterator helpers over `Result` to reduce boilerplate at boundaries.
///
/// - `collect_ok`: collects `Ok` items, returning the first `Error`.
/// - `first_error`: scans and returns the first `Error` without allocation.
pub trait IterResultExt<T>: Sized {
    fn collect_ok(self) -> Result<Vec<T>>;
    fn first_error(self) -> Option<super::Error>;
}

impl<I, T> IterResultExt<T> for I
where
    I: IntoIterator<Item = Result<T>>,
{
    fn collect_ok(self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for r in self {
            out.push(r?);
        }
        Ok(out)
    }

    fn first_error(self) -> Option<super::Error> {
        self.into_iter().find_map(|r| r.err())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{DomainError, Error, FatalError};

    #[derive(Default)]
    struct Count(AtomicUsize);

    impl ErrorPolicy for Count {
        fn classify(&self, error: &Error) -> Severity {
            error.severity()
        }
        fn emit(&self, _error: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn emit_only_matching_severity() {
        let policy = Count::default();
        let fatal: Result<()> = Err(FatalError::UnassignedFlag { flag: "A".into() }.into());

        let fatal = fatal.emit_warning(&policy).emit_error(&policy);
        assert_eq!(policy.0.load(Ordering::SeqCst), 0);

        let _ = fatal.emit_fatal(&policy);
        assert_eq!(policy.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn collect_ok_stops_at_first_error() {
        let items: Vec<Result<u32>> = vec![
            Ok(1),
            Err(DomainError::Resolve {
                message: "boom".into(),
            }
            .into()),
            Ok(3),
        ];
        assert!(items.clone().first_error().is_some());
        assert!(items.collect_ok().is_err());

        let fine: Vec<Result<u32>> = vec![Ok(1), Ok(2)];
        assert_eq!(fine.collect_ok().unwrap(), vec![1, 2]);
    }
}
