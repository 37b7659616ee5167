use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An explicit assignment of boolean values to named flags.
///
/// Configurations are immutable once handed to a resolution pass; the builder methods consume
/// `self` and return a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    flags: BTreeMap<String, bool>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every named flag is assigned `true`.
    pub fn defined<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(|f| (f.into(), true)).collect(),
        }
    }

    pub fn with(mut self, flag: impl Into<String>, value: bool) -> Self {
        self.flags.insert(flag.into(), value);
        self
    }

    /// `None` when the flag was never assigned.
    pub fn get(&self, flag: &str) -> Option<bool> {
        self.flags.get(flag).copied()
    }

    pub fn is_defined(&self, flag: &str) -> bool {
        self.get(flag).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.flags
                .iter()
                .map(|(flag, value)| format!("{flag}: {value}"))
                .join(", ")
        )
    }
}
