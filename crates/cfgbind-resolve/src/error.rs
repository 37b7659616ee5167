//! Error types for cfgbind-resolve.
//!
//! Every variant aborts the resolution pass that raised it; no partial bindings are produced.
//! A conversion into the workspace-wide error type is provided so callers can route failures
//! through an [`cfgbind_error::ErrorPolicy`].
use cfgbind_error::{DomainError, FatalError, InternalError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No variant of `{name}` is active under the configuration")]
    NoActiveVariant { name: String },

    #[error("Variants {variants:?} of `{name}` are active at the same time")]
    AmbiguousVariant { name: String, variants: Vec<usize> },

    #[error("Cyclic by-value reference between {names:?}")]
    CyclicReference { names: Vec<String> },

    #[error("Flag `{0}` is not assigned by the configuration (strict mode)")]
    UnknownFlag(String),

    #[error("`{referrer}` references unknown type `{name}`")]
    UnknownType { referrer: String, name: String },

    #[error("Refusing to enumerate {count} flags (limit is {limit})")]
    TooManyFlags { count: usize, limit: usize },

    #[error("Failed to serialize bindings: {0}")]
    Serialize(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<ResolveError> for cfgbind_error::Error {
    fn from(value: ResolveError) -> cfgbind_error::Error {
        match value {
            ResolveError::NoActiveVariant { name } => FatalError::VariantConflict {
                name,
                message: "no active variant".to_string(),
            }
            .into(),
            ResolveError::AmbiguousVariant { name, variants } => FatalError::VariantConflict {
                name,
                message: format!("variants {variants:?} are active at the same time"),
            }
            .into(),
            ResolveError::CyclicReference { names } => {
                FatalError::DependencyCycle { names }.into()
            }
            ResolveError::UnknownFlag(flag) => FatalError::UnassignedFlag { flag }.into(),
            e @ (ResolveError::UnknownType { .. } | ResolveError::TooManyFlags { .. }) => {
                DomainError::Resolve {
                    message: e.to_string(),
                }
                .into()
            }
            ResolveError::Serialize(msg) => InternalError::InvalidState(msg).into(),
        }
    }
}

impl From<ConfigError> for cfgbind_error::Error {
    fn from(value: ConfigError) -> cfgbind_error::Error {
        match value {
            ConfigError::Parse(msg) => FatalError::InvalidConfig(msg).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cfgbind_error::Severity;

    use super::*;

    #[test]
    fn variant_conflicts_are_fatal() {
        let err: cfgbind_error::Error = ResolveError::AmbiguousVariant {
            name: "Bar".into(),
            variants: vec![0, 1],
        }
        .into();
        assert_eq!(err.severity(), Severity::Fatal);
        assert_eq!(
            err.to_string(),
            "Variant conflict for `Bar`: variants [0, 1] are active at the same time"
        );
    }

    #[test]
    fn unknown_flag_aborts_as_fatal() {
        let err: cfgbind_error::Error = ResolveError::UnknownFlag("X11".into()).into();
        assert_eq!(err.severity(), Severity::Fatal);
        assert_eq!(
            err,
            cfgbind_error::Error::Fatal(FatalError::UnassignedFlag { flag: "X11".into() })
        );
    }
}
