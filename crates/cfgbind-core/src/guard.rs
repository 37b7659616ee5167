use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Parsed guard expression tree.
///
/// A guard decides whether a variant is live under a [`Configuration`](crate::Configuration).
/// Variants without a guard are represented as `Option<Guard>::None` and are always active.
///
/// `All(vec![])` is true and `Any(vec![])` is false, matching `cfg(all())` / `cfg(any())`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Guard {
    Defined(String),
    Not(Box<Guard>),
    All(Vec<Guard>),
    Any(Vec<Guard>),
}

impl Guard {
    pub fn defined(flag: impl Into<String>) -> Self {
        Guard::Defined(flag.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Guard) -> Self {
        Guard::Not(Box::new(inner))
    }

    pub fn all(children: impl IntoIterator<Item = Guard>) -> Self {
        Guard::All(children.into_iter().collect())
    }

    pub fn any(children: impl IntoIterator<Item = Guard>) -> Self {
        Guard::Any(children.into_iter().collect())
    }

    /// Every flag referenced anywhere in the expression, sorted and deduplicated.
    pub fn flags(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_flags(&mut out);
        out
    }

    fn collect_flags<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Guard::Defined(flag) => {
                out.insert(flag.as_str());
            }
            Guard::Not(inner) => inner.collect_flags(out),
            Guard::All(children) | Guard::Any(children) => {
                for child in children {
                    child.collect_flags(out);
                }
            }
        }
    }

    /// Combines the guard of an enclosing scope with the guard of an item inside it.
    ///
    /// Nested conjunctions are flattened so that a guard inherited through several scopes
    /// reads as a single `All`.
    pub fn join(parent: Option<&Guard>, child: Option<Guard>) -> Option<Guard> {
        match (parent, child) {
            (None, child) => child,
            (Some(parent), None) => Some(parent.clone()),
            (Some(parent), Some(child)) => {
                let mut parts = Vec::new();
                for guard in [parent.clone(), child] {
                    match guard {
                        Guard::All(children) => parts.extend(children),
                        other => parts.push(other),
                    }
                }
                Some(Guard::All(parts))
            }
        }
    }

    /// Conjoins a list of guards: `None` for an empty list, the guard itself for one element.
    pub fn join_all(guards: impl IntoIterator<Item = Guard>) -> Option<Guard> {
        guards
            .into_iter()
            .fold(None, |acc, guard| Guard::join(acc.as_ref(), Some(guard)))
    }
}

/// Renders the preprocessor-style form, e.g. `(defined(NOT_DEFINED) || defined(DEFINED))`.
/// Only used for diagnostics and logs.
impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Defined(flag) => write!(f, "defined({flag})"),
            Guard::Not(inner) => write!(f, "!{inner}"),
            Guard::All(children) if children.is_empty() => write!(f, "1"),
            Guard::Any(children) if children.is_empty() => write!(f, "0"),
            Guard::All(children) if children.len() == 1 => write!(f, "{}", children[0]),
            Guard::Any(children) if children.len() == 1 => write!(f, "{}", children[0]),
            Guard::All(children) => write!(f, "({})", children.iter().join(" && ")),
            Guard::Any(children) => write!(f, "({})", children.iter().join(" || ")),
        }
    }
}
