//! TOML-backed configuration.
//!
//! ```toml
//! strict = false
//! absent = "omit"
//!
//! [export]
//! include = ["Root"]
//! exclude = ["Internal"]
//! prune_unreachable = true
//!
//! [defines]
//! "feature = serde" = "DEFINE_SERDE"
//! "unix" = "DEFINE_UNIX"
//! ```
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What a resolution pass does with a name none of whose variants is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentPolicy {
    /// Fail with `NoActiveVariant`.
    #[default]
    Error,
    /// Drop the name; only references to it are an error.
    Omit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Names emitted even when nothing reaches them.
    pub include: Vec<String>,
    /// Names skipped before resolution; references to them are left to the caller.
    pub exclude: Vec<String>,
    /// Emit only types reachable from functions and from `include`.
    pub prune_unreachable: bool,
}

impl ExportConfig {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindConfig {
    pub strict: bool,
    pub absent: AbsentPolicy,
    pub export: ExportConfig,
    /// Rust cfg predicate (`feature = serde`, `unix`) -> flag name.
    pub defines: BTreeMap<String, String>,
}

impl BindConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            strict: self.strict,
            absent: self.absent,
            export: self.export.clone(),
        }
    }

    pub fn define_for(&self, predicate: &str) -> Option<&str> {
        self.defines.get(predicate).map(String::as_str)
    }
}

/// The subset of [`BindConfig`] a resolution pass needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub strict: bool,
    pub absent: AbsentPolicy,
    pub export: ExportConfig,
}

impl ResolveOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_absent(mut self, absent: AbsentPolicy) -> Self {
        self.absent = absent;
        self
    }

    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}
