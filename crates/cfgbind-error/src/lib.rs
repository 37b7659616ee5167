pub mod domain;
pub mod fatal;
pub mod internal;
pub mod policy;
pub mod result_ext;
pub mod severity;

// public exports
pub use domain::DomainError;
pub use fatal::FatalError;
pub use internal::InternalError;
pub use policy::{CombinedPolicy, ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::{IterResultExt, ResultExt};
pub use severity::Severity;

pub type Result<T> = std::result::Result<T, Error>;

/// Workspace-wide error type. Each crate keeps its own error enum and converts into this one
/// at its boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl Error {
    /// The default classification. Policies may override it; nothing built in is a warning.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Fatal(_) => Severity::Fatal,
            Error::Internal(_) | Error::Domain(_) => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_variant() {
        let fatal: Error = FatalError::DependencyCycle {
            names: vec!["A".into(), "B".into()],
        }
        .into();
        assert_eq!(fatal.severity(), Severity::Fatal);

        let unassigned: Error = FatalError::UnassignedFlag {
            flag: "DEFINED".into(),
        }
        .into();
        assert_eq!(unassigned.severity(), Severity::Fatal);

        let domain: Error = DomainError::Resolve {
            message: "bad".into(),
        }
        .into();
        assert_eq!(domain.severity(), Severity::Error);
    }

    #[test]
    fn transparent_display() {
        let err: Error = FatalError::MissingDefine {
            predicate: "feature = serde".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Missing define for cfg predicate `feature = serde`"
        );
    }
}
