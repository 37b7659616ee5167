#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FatalError {
    #[error("Invalid Rust syntax: {0}")]
    SyntaxError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Variant conflict for `{name}`: {message}")]
    VariantConflict { name: String, message: String },

    #[error("Dependency cycle between {names:?}")]
    DependencyCycle { names: Vec<String> },

    #[error("Flag `{flag}` is referenced by a guard but not assigned")]
    UnassignedFlag { flag: String },

    #[error("Missing define for cfg predicate `{predicate}`")]
    MissingDefine { predicate: String },
}
