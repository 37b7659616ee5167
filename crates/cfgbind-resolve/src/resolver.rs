//! Conflict resolution: one active variant per name for a fixed configuration.
use cfgbind_core::{Configuration, FunctionVariant, TypeVariant};
use fxhash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{
    config::{AbsentPolicy, ExportConfig, ResolveOptions},
    error::ResolveError,
    eval::Evaluator,
    logging::{LOG_TARGET_EVAL, LOG_TARGET_RESOLVE},
    table::{DefinitionTable, Guarded, ItemMap},
};

/// A name bound to the single variant that is active under the pass's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'t, V> {
    pub name: &'t str,
    /// Index of the selected variant among the variants registered for `name`.
    pub index: usize,
    pub variant: &'t V,
}

pub type ResolvedType<'t> = Resolved<'t, TypeVariant>;
pub type ResolvedFunction<'t> = Resolved<'t, FunctionVariant>;

/// Output of one resolution pass. Borrows the table it was resolved from.
#[derive(Debug, Clone)]
pub struct Resolution<'t> {
    configuration: Configuration,
    export: ExportConfig,
    types: Vec<ResolvedType<'t>>,
    type_index: FxHashMap<&'t str, usize>,
    functions: Vec<ResolvedFunction<'t>>,
}

impl<'t> Resolution<'t> {
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Resolved types in table registration order.
    pub fn types(&self) -> &[ResolvedType<'t>] {
        &self.types
    }

    /// Resolved functions in table registration order.
    pub fn functions(&self) -> &[ResolvedFunction<'t>] {
        &self.functions
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedType<'t>> {
        self.type_index.get(name).map(|&i| &self.types[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.type_index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty()
    }
}

/// Resolves with default options: lenient evaluation, absent names are an error.
pub fn resolve<'t>(
    table: &'t DefinitionTable,
    config: &Configuration,
) -> Result<Resolution<'t>, ResolveError> {
    Resolver::default().resolve(table, config)
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
    evaluator: Evaluator,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        let evaluator = Evaluator::new(options.strict);
        Self { options, evaluator }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn resolve<'t>(
        &self,
        table: &'t DefinitionTable,
        config: &Configuration,
    ) -> Result<Resolution<'t>, ResolveError> {
        debug!(target: LOG_TARGET_RESOLVE, configuration = %config, names = table.len(), "starting resolution pass");

        let types = self.select_all(table.types(), config)?;
        let functions = self.select_all(table.functions(), config)?;

        let type_index = types
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name, i))
            .collect();
        let resolution = Resolution {
            configuration: config.clone(),
            export: self.options.export.clone(),
            types,
            type_index,
            functions,
        };

        self.check_references(table, &resolution)?;
        Ok(resolution)
    }

    fn select_all<'t, V: Guarded>(
        &self,
        items: &'t ItemMap<V>,
        config: &Configuration,
    ) -> Result<Vec<Resolved<'t, V>>, ResolveError> {
        let mut out = Vec::with_capacity(items.len());
        for (name, variants) in items.iter() {
            if self.options.export.is_excluded(name) {
                debug!(target: LOG_TARGET_RESOLVE, item = name, "skipping excluded name");
                continue;
            }
            match self.select(name, variants, config)? {
                Some(resolved) => out.push(resolved),
                None => match self.options.absent {
                    AbsentPolicy::Error => {
                        return Err(ResolveError::NoActiveVariant {
                            name: name.to_string(),
                        });
                    }
                    AbsentPolicy::Omit => {
                        debug!(target: LOG_TARGET_RESOLVE, item = name, "no active variant, omitted");
                    }
                },
            }
        }
        Ok(out)
    }

    /// Picks the unique active variant of `name`, `None` when no variant is active.
    fn select<'t, V: Guarded>(
        &self,
        name: &'t str,
        variants: &'t [V],
        config: &Configuration,
    ) -> Result<Option<Resolved<'t, V>>, ResolveError> {
        let mut active = Vec::new();
        for (index, variant) in variants.iter().enumerate() {
            let live = self.evaluator.evaluate_opt(variant.guard(), config)?;
            trace!(
                target: LOG_TARGET_EVAL,
                item = name,
                index,
                guard = %variant.guard().map(ToString::to_string).unwrap_or_else(|| "<none>".to_string()),
                live,
                "evaluated guard"
            );
            if live {
                active.push(index);
            }
        }

        match active.len() {
            0 => Ok(None),
            1 => {
                let index = active[0];
                debug!(target: LOG_TARGET_RESOLVE, item = name, variant = index, "selected variant");
                Ok(Some(Resolved {
                    name,
                    index,
                    variant: &variants[index],
                }))
            }
            _ => Err(ResolveError::AmbiguousVariant {
                name: name.to_string(),
                variants: active,
            }),
        }
    }

    /// Every name an active item mentions must itself be active, or excluded.
    fn check_references(
        &self,
        table: &DefinitionTable,
        resolution: &Resolution<'_>,
    ) -> Result<(), ResolveError> {
        let type_refs = resolution
            .types()
            .iter()
            .flat_map(|r| r.variant.referenced_names().map(move |n| (r.name, n)));
        let fn_refs = resolution
            .functions()
            .iter()
            .flat_map(|r| r.variant.referenced_names().map(move |n| (r.name, n)));

        let mut checked: FxHashSet<&str> = FxHashSet::default();
        for (referrer, name) in type_refs.chain(fn_refs) {
            if !checked.insert(name) {
                continue;
            }
            if resolution.get(name).is_some() || self.options.export.is_excluded(name) {
                continue;
            }
            if table.contains(name) {
                return Err(ResolveError::NoActiveVariant {
                    name: name.to_string(),
                });
            }
            return Err(ResolveError::UnknownType {
                referrer: referrer.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cfgbind_core::{Field, Guard, Primitive, TypeRef};

    use super::*;

    fn fixture() -> DefinitionTable {
        let mut table = DefinitionTable::new();
        table.register(
            "Foo",
            Some(Guard::any([
                Guard::defined("NOT_DEFINED"),
                Guard::defined("DEFINED"),
            ])),
            vec![Field::new("x", Primitive::I32)],
        );
        table.register(
            "Bar",
            Some(Guard::defined("NOT_DEFINED")),
            vec![Field::new("y", TypeRef::named("Foo"))],
        );
        table.register(
            "Bar",
            Some(Guard::defined("DEFINED")),
            vec![Field::new("z", TypeRef::named("Foo"))],
        );
        table.register("Root", None, vec![Field::new("w", TypeRef::named("Bar"))]);
        table
    }

    fn config(defined: bool, not_defined: bool) -> Configuration {
        Configuration::new()
            .with("DEFINED", defined)
            .with("NOT_DEFINED", not_defined)
    }

    #[test]
    fn picks_the_single_active_variant() {
        let table = fixture();
        let res = resolve(&table, &config(true, false)).unwrap();
        let bar = res.get("Bar").unwrap();
        assert_eq!(bar.index, 1);
        assert_eq!(bar.variant.fields[0].name, "z");

        let res = resolve(&table, &config(false, true)).unwrap();
        assert_eq!(res.get("Bar").unwrap().index, 0);
    }

    #[test]
    fn both_flags_are_ambiguous() {
        let table = fixture();
        let err = resolve(&table, &config(true, true)).unwrap_err();
        assert_eq!(
            err,
            ResolveError::AmbiguousVariant {
                name: "Bar".into(),
                variants: vec![0, 1]
            }
        );
    }

    #[test]
    fn neither_flag_leaves_no_variant() {
        let table = fixture();
        // `Foo` is registered first and is the first name without an active variant.
        let err = resolve(&table, &config(false, false)).unwrap_err();
        assert_eq!(err, ResolveError::NoActiveVariant { name: "Foo".into() });
    }

    #[test]
    fn omitted_names_still_fail_when_referenced() {
        let table = fixture();
        let resolver = Resolver::new(ResolveOptions::default().with_absent(AbsentPolicy::Omit));
        let err = resolver.resolve(&table, &config(false, false)).unwrap_err();
        assert_eq!(err, ResolveError::NoActiveVariant { name: "Bar".into() });
    }

    #[test]
    fn omitted_names_are_dropped_when_unreferenced() {
        let mut table = DefinitionTable::new();
        table.register("Extra", Some(Guard::defined("EXTRA")), Vec::new());
        table.register("Plain", None, Vec::new());
        let resolver = Resolver::new(ResolveOptions::default().with_absent(AbsentPolicy::Omit));
        let res = resolver.resolve(&table, &Configuration::new()).unwrap();
        assert!(res.get("Extra").is_none());
        assert_eq!(res.len(), 1);
    }

    #[test]
    fn unknown_reference_is_reported_with_referrer() {
        let mut table = DefinitionTable::new();
        table.register(
            "Root",
            None,
            vec![Field::new("w", TypeRef::ptr(TypeRef::named("Ghost")))],
        );
        let err = resolve(&table, &Configuration::new()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownType {
                referrer: "Root".into(),
                name: "Ghost".into()
            }
        );
    }

    #[test]
    fn excluded_names_are_external() {
        let mut table = fixture();
        table.register("Hidden", Some(Guard::defined("NOWHERE")), Vec::new());
        table.register(
            "UsesHidden",
            None,
            vec![Field::new("h", TypeRef::named("Hidden"))],
        );
        let export = ExportConfig {
            exclude: vec!["Hidden".into()],
            ..Default::default()
        };
        let resolver = Resolver::new(ResolveOptions::default().with_export(export));
        let res = resolver.resolve(&table, &config(true, false)).unwrap();
        assert!(res.get("Hidden").is_none());
        assert!(res.get("UsesHidden").is_some());
    }

    #[test]
    fn strict_mode_rejects_unassigned_flags() {
        let table = fixture();
        let resolver = Resolver::new(ResolveOptions::strict());
        let partial = Configuration::new().with("DEFINED", true);
        assert_eq!(
            resolver.resolve(&table, &partial).unwrap_err(),
            ResolveError::UnknownFlag("NOT_DEFINED".into())
        );
        assert!(resolver.resolve(&table, &config(true, false)).is_ok());
    }

    #[test]
    fn guarded_functions_resolve_like_types() {
        let mut table = fixture();
        table.register_function(FunctionVariant::new(
            "root",
            Some(Guard::defined("DEFINED")),
            vec![Field::new("a", TypeRef::named("Root"))],
            None,
        ));
        table.register_function(FunctionVariant::new(
            "root",
            Some(Guard::defined("NOT_DEFINED")),
            vec![Field::new("a", TypeRef::named("Root"))],
            None,
        ));
        let res = resolve(&table, &config(false, true)).unwrap();
        assert_eq!(res.functions().len(), 1);
        assert_eq!(res.functions()[0].index, 1);
    }
}
