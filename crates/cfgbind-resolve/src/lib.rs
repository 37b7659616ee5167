//! Resolution of conditionally defined types and functions.
//!
//! A [`DefinitionTable`] holds every variant of every name, each behind an optional
//! [`Guard`](cfgbind_core::Guard). A resolution pass fixes a [`Configuration`](cfgbind_core::Configuration),
//! selects exactly one active variant per name and [`emit`]s the result with every type after
//! the types it contains by value.
//!
//! ```
//! use cfgbind_core::{Configuration, Field, Guard, Primitive, TypeRef};
//! use cfgbind_resolve::{DefinitionTable, emit, resolve};
//!
//! let mut table = DefinitionTable::new();
//! table.register("Wrapper", None, vec![Field::new("inner", TypeRef::named("Inner"))]);
//! table.register("Inner", Some(Guard::defined("WIDE")), vec![Field::new("v", Primitive::I64)]);
//! table.register("Inner", Some(Guard::not(Guard::defined("WIDE"))), vec![Field::new("v", Primitive::I32)]);
//!
//! let config = Configuration::new().with("WIDE", false);
//! let bindings = emit(&resolve(&table, &config)?)?;
//! assert_eq!(bindings.names().collect::<Vec<_>>(), ["Inner", "Wrapper"]);
//! # Ok::<(), cfgbind_resolve::ResolveError>(())
//! ```
pub mod batch;
pub mod config;
pub mod emit;
pub mod error;
pub mod eval;
pub mod guarded;
mod logging;
mod order;
pub mod resolver;
pub mod table;

pub use batch::{MAX_ENUMERATED_FLAGS, all_configurations, resolve_all};
pub use config::{AbsentPolicy, BindConfig, ExportConfig, ResolveOptions};
pub use emit::{Bindings, Declaration, emit};
pub use error::{ConfigError, ResolveError};
pub use eval::{Evaluator, evaluate};
pub use guarded::{GuardedBindings, GuardedDeclaration, emit_guarded};
pub use resolver::{Resolution, Resolved, ResolvedFunction, ResolvedType, Resolver, resolve};
pub use table::{DefinitionTable, Guarded, ItemMap};
