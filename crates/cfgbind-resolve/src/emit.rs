//! Turns a [`Resolution`] into an ordered declaration sequence.
use std::collections::VecDeque;

use cfgbind_core::{Configuration, Field, FunctionVariant, TypeKind, TypeRef, TypeVariant};
use fxhash::FxHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::ResolveError, logging::LOG_TARGET_EMIT, order::dependency_order, resolver::Resolution,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    Type {
        name: String,
        kind: TypeKind,
        /// Which of the name's registered variants this is.
        variant: usize,
        fields: Vec<Field>,
    },
    Function {
        name: String,
        variant: usize,
        args: Vec<Field>,
        ret: Option<TypeRef>,
    },
}

impl Declaration {
    pub(crate) fn from_type(variant: &TypeVariant, index: usize) -> Self {
        Declaration::Type {
            name: variant.name.clone(),
            kind: variant.kind.clone(),
            variant: index,
            fields: variant.fields.clone(),
        }
    }

    pub(crate) fn from_function(function: &FunctionVariant, index: usize) -> Self {
        Declaration::Function {
            name: function.name.clone(),
            variant: index,
            args: function.args.clone(),
            ret: function.ret.clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Type { name, .. } | Declaration::Function { name, .. } => name,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Declaration::Function { .. })
    }
}

/// Declarations of one configuration: types in dependency order, then function prototypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub configuration: Configuration,
    pub declarations: Vec<Declaration>,
}

impl Bindings {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(Declaration::name)
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| !d.is_function() && d.name() == name)
    }

    /// Pretty RON rendering. Stable for equal bindings.
    pub fn to_ron(&self) -> Result<String, ResolveError> {
        to_ron(self)
    }
}

pub(crate) fn to_ron<T: Serialize>(value: &T) -> Result<String, ResolveError> {
    ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| ResolveError::Serialize(e.to_string()))
}

pub fn emit(resolution: &Resolution<'_>) -> Result<Bindings, ResolveError> {
    let types = resolution.types();
    let keep = reachable(resolution);

    let kept: Vec<usize> = (0..types.len()).filter(|&i| keep[i]).collect();
    let deps: Vec<Vec<usize>> = kept
        .iter()
        .map(|&i| {
            types[i]
                .variant
                .value_dependencies()
                .into_iter()
                .filter_map(|dep| resolution.position(dep))
                .filter_map(|pos| kept.iter().position(|&k| k == pos))
                .collect()
        })
        .collect();

    let order = dependency_order(&deps).map_err(|cycle| ResolveError::CyclicReference {
        names: cycle
            .into_iter()
            .map(|i| types[kept[i]].name.to_string())
            .collect(),
    })?;

    let mut declarations: Vec<Declaration> = order
        .into_iter()
        .map(|i| {
            let resolved = &types[kept[i]];
            Declaration::from_type(resolved.variant, resolved.index)
        })
        .collect();

    declarations.extend(
        resolution
            .functions()
            .iter()
            .sorted_by_key(|f| f.name)
            .map(|f| Declaration::from_function(f.variant, f.index)),
    );

    debug!(
        target: LOG_TARGET_EMIT,
        configuration = %resolution.configuration(),
        declarations = declarations.len(),
        pruned = types.len() - kept.len(),
        "emitted bindings"
    );

    Ok(Bindings {
        configuration: resolution.configuration().clone(),
        declarations,
    })
}

/// Which resolved types survive reachability pruning, indexed like `resolution.types()`.
fn reachable(resolution: &Resolution<'_>) -> Vec<bool> {
    let types = resolution.types();
    let export = resolution.export();
    if !export.prune_unreachable {
        return vec![true; types.len()];
    }

    let mut keep = vec![false; types.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    let roots = resolution
        .functions()
        .iter()
        .flat_map(|f| f.variant.referenced_names())
        .chain(export.include.iter().map(String::as_str));
    for name in roots {
        if seen.insert(name) {
            if let Some(pos) = resolution.position(name) {
                queue.push_back(pos);
            }
        }
    }

    while let Some(pos) = queue.pop_front() {
        keep[pos] = true;
        for name in types[pos].variant.referenced_names() {
            if seen.insert(name) {
                if let Some(next) = resolution.position(name) {
                    queue.push_back(next);
                }
            }
        }
    }
    keep
}
