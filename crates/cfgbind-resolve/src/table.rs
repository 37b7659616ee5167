//! Conditional definition table: every declared name and its guarded variants.
use std::collections::BTreeSet;

use cfgbind_core::{Field, FunctionVariant, Guard, TypeVariant};
use fxhash::FxHashMap;

/// Anything that can be registered under a name with an optional guard.
pub trait Guarded {
    fn name(&self) -> &str;
    fn guard(&self) -> Option<&Guard>;
}

impl Guarded for TypeVariant {
    fn name(&self) -> &str {
        &self.name
    }
    fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }
}

impl Guarded for FunctionVariant {
    fn name(&self) -> &str {
        &self.name
    }
    fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    name: String,
    variants: Vec<V>,
}

/// Name -> variants, iterated in first-registration order of the names.
#[derive(Debug, Clone)]
pub struct ItemMap<V> {
    entries: Vec<Entry<V>>,
    index: FxHashMap<String, usize>,
}

impl<V> Default for ItemMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<V: Guarded> ItemMap<V> {
    /// Appends a variant, returning its index among the variants of the same name.
    pub fn push(&mut self, variant: V) -> usize {
        match self.index.get(variant.name()) {
            Some(&slot) => {
                let variants = &mut self.entries[slot].variants;
                variants.push(variant);
                variants.len() - 1
            }
            None => {
                let name = variant.name().to_string();
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Entry {
                    name,
                    variants: vec![variant],
                });
                0
            }
        }
    }

    pub fn get(&self, name: &str) -> &[V] {
        self.index
            .get(name)
            .map(|&slot| self.entries[slot].variants.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` in registration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.variants.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }

    fn all_variants(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().flat_map(|e| e.variants.iter())
    }
}

/// Static input of every resolution pass. Shared read-only across passes.
///
/// Structurally identical variants with overlapping guards are recorded as given; the resolver
/// reports them when both turn out active.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    types: ItemMap<TypeVariant>,
    functions: ItemMap<FunctionVariant>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct variant; returns its index among the variants of `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        guard: Option<Guard>,
        fields: Vec<Field>,
    ) -> usize {
        self.register_variant(TypeVariant::structure(name, guard, fields))
    }

    pub fn register_variant(&mut self, variant: TypeVariant) -> usize {
        self.types.push(variant)
    }

    pub fn register_function(&mut self, function: FunctionVariant) -> usize {
        self.functions.push(function)
    }

    /// All variants of a type name in registration order; empty for unknown names.
    pub fn variants_of(&self, name: &str) -> &[TypeVariant] {
        self.types.get(name)
    }

    pub fn function_variants_of(&self, name: &str) -> &[FunctionVariant] {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.names()
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.names()
    }

    pub fn types(&self) -> &ItemMap<TypeVariant> {
        &self.types
    }

    pub fn functions(&self) -> &ItemMap<FunctionVariant> {
        &self.functions
    }

    /// Number of distinct type names.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty()
    }

    /// Every flag referenced by any guard in the table.
    pub fn flags(&self) -> BTreeSet<&str> {
        let type_guards = self.types.all_variants().filter_map(|v| v.guard());
        let fn_guards = self.functions.all_variants().filter_map(|v| v.guard());
        type_guards.chain(fn_guards).flat_map(|g| g.flags()).collect()
    }
}

#[cfg(test)]
mod tests {
    use cfgbind_core::{Primitive, TypeRef};

    use super::*;

    fn bar_table() -> DefinitionTable {
        let mut table = DefinitionTable::new();
        table.register("Foo", None, vec![Field::new("x", Primitive::I32)]);
        let a = table.register(
            "Bar",
            Some(Guard::defined("NOT_DEFINED")),
            vec![Field::new("y", TypeRef::named("Foo"))],
        );
        let b = table.register(
            "Bar",
            Some(Guard::defined("DEFINED")),
            vec![Field::new("z", TypeRef::named("Foo"))],
        );
        assert_eq!((a, b), (0, 1));
        table
    }

    #[test]
    fn variants_keep_registration_order() {
        let table = bar_table();
        let bars = table.variants_of("Bar");
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].fields[0].name, "y");
        assert_eq!(bars[1].fields[0].name, "z");
        assert!(table.variants_of("Missing").is_empty());
    }

    #[test]
    fn names_in_first_registration_order() {
        let mut table = bar_table();
        table.register("Foo", Some(Guard::defined("LATE")), Vec::new());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Foo", "Bar"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.types().variant_count(), 4);
        assert_eq!(table.types().position("Bar"), Some(1));
    }

    #[test]
    fn identical_variants_are_recorded() {
        let mut table = DefinitionTable::new();
        table.register("Dup", None, Vec::new());
        table.register("Dup", None, Vec::new());
        assert_eq!(table.variants_of("Dup").len(), 2);
    }

    #[test]
    fn flags_cover_types_and_functions() {
        let mut table = bar_table();
        table.register_function(FunctionVariant::new(
            "root",
            Some(Guard::defined("X11")),
            Vec::new(),
            None,
        ));
        assert_eq!(
            table.flags().into_iter().collect::<Vec<_>>(),
            vec!["DEFINED", "NOT_DEFINED", "X11"]
        );
    }
}
