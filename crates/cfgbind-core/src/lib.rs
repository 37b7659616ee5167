//! Core data types shared across the cfgbind workspace.
//!
//! Nothing here evaluates or resolves anything; see `cfgbind-resolve` for that.
pub mod configuration;
pub mod guard;
pub mod types;
pub mod variant;

pub use configuration::Configuration;
pub use guard::Guard;
pub use types::{Field, Primitive, TypeRef};
pub use variant::{FunctionVariant, TypeKind, TypeVariant};
