//! Configuration-independent output: every variant is kept next to its guard.
//!
//! Names are ordered over the union of all their variants' by-value references, so the order
//! holds whichever variants end up selected.
use cfgbind_core::Guard;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ResolveOptions,
    emit::{Declaration, to_ron},
    error::ResolveError,
    logging::LOG_TARGET_EMIT,
    order::dependency_order,
    table::DefinitionTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardedDeclaration {
    pub guard: Option<Guard>,
    pub declaration: Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardedBindings {
    pub declarations: Vec<GuardedDeclaration>,
}

impl GuardedBindings {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.declaration.name())
    }

    pub fn to_ron(&self) -> Result<String, ResolveError> {
        to_ron(self)
    }
}

pub fn emit_guarded(
    table: &DefinitionTable,
    options: &ResolveOptions,
) -> Result<GuardedBindings, ResolveError> {
    let export = &options.export;
    let entries: Vec<_> = table
        .types()
        .iter()
        .filter(|(name, _)| !export.is_excluded(name))
        .collect();
    let position = |name: &str| entries.iter().position(|(n, _)| *n == name);

    for (referrer, name) in entries
        .iter()
        .flat_map(|(n, variants)| variants.iter().map(move |v| (*n, v)))
        .flat_map(|(n, v)| v.referenced_names().map(move |r| (n, r)))
        .chain(
            table
                .functions()
                .iter()
                .filter(|(name, _)| !export.is_excluded(name))
                .flat_map(|(n, variants)| variants.iter().map(move |v| (n, v)))
                .flat_map(|(n, v)| v.referenced_names().map(move |r| (n, r))),
        )
    {
        if !table.contains(name) && !export.is_excluded(name) {
            return Err(ResolveError::UnknownType {
                referrer: referrer.to_string(),
                name: name.to_string(),
            });
        }
    }

    let deps: Vec<Vec<usize>> = entries
        .iter()
        .map(|(_, variants)| {
            variants
                .iter()
                .flat_map(|v| v.value_dependencies())
                .filter_map(position)
                .unique()
                .collect()
        })
        .collect();

    let order = dependency_order(&deps).map_err(|cycle| ResolveError::CyclicReference {
        names: cycle.into_iter().map(|i| entries[i].0.to_string()).collect(),
    })?;

    let mut declarations = Vec::with_capacity(table.types().variant_count());
    for i in order {
        let (_, variants) = entries[i];
        declarations.extend(variants.iter().enumerate().map(|(index, v)| GuardedDeclaration {
            guard: v.guard.clone(),
            declaration: Declaration::from_type(v, index),
        }));
    }

    let functions = table
        .functions()
        .iter()
        .filter(|(name, _)| !export.is_excluded(name))
        .sorted_by_key(|(name, _)| *name);
    for (_, variants) in functions {
        declarations.extend(variants.iter().enumerate().map(|(index, f)| GuardedDeclaration {
            guard: f.guard.clone(),
            declaration: Declaration::from_function(f, index),
        }));
    }

    debug!(target: LOG_TARGET_EMIT, declarations = declarations.len(), "emitted guarded bindings");
    Ok(GuardedBindings { declarations })
}
