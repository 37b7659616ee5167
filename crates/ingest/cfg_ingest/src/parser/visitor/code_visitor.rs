use cfgbind_core::{Field, FunctionVariant, Guard, TypeKind, TypeVariant};
use cfgbind_resolve::BindConfig;
use colored::Colorize;
use log::{debug, trace, warn};
use syn::{Fields, ItemEnum, ItemFn, ItemMod, ItemStruct, ItemType, ItemUnion, visit::Visit};

use super::attribute_processing::{
    guard_from_attrs, int_repr, is_extern_c, is_no_mangle, is_repr_c,
};
use super::type_processing::{process_return, process_type};
use crate::error::IngestError;
use crate::utils::{LOG_TARGET_VISIT, LogStyle};

/// One definition found in the source, in the order it was found.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Discovered {
    Type(TypeVariant),
    Function(FunctionVariant),
}

/// Walks a parsed file and collects guarded definitions.
///
/// `Visit` methods cannot return errors, so the first failure is stored and every later item
/// is skipped. Callers read it back through [`CodeVisitor::finish`].
pub(crate) struct CodeVisitor<'c> {
    config: &'c BindConfig,
    current_scope_guard: Option<Guard>,
    guard_stack: Vec<Option<Guard>>,
    discovered: Vec<Discovered>,
    error: Option<IngestError>,
}

impl<'c> CodeVisitor<'c> {
    pub(crate) fn new(config: &'c BindConfig) -> Self {
        Self {
            config,
            current_scope_guard: None,
            guard_stack: Vec::new(),
            discovered: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn finish(self) -> Result<Vec<Discovered>, IngestError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.discovered),
        }
    }

    fn fail(&mut self, err: IngestError) {
        warn!(target: LOG_TARGET_VISIT, "{} {}", "Ingest failed:".log_error(), err);
        self.error.get_or_insert(err);
    }

    /// The guard an item ends up with: its own `#[cfg]`s joined onto the enclosing scope's.
    fn effective_guard(&self, attrs: &[syn::Attribute]) -> Result<Option<Guard>, IngestError> {
        let item_guard = guard_from_attrs(attrs, self.config)?;
        Ok(Guard::join(self.current_scope_guard.as_ref(), item_guard))
    }

    fn push_scope(&mut self, name: &str, guard: Option<Guard>) {
        self.guard_stack
            .push(std::mem::replace(&mut self.current_scope_guard, guard));
        trace!(target: LOG_TARGET_VISIT, ">>> Entering Scope: {} | Guard: {:?}", name.cyan(), self.current_scope_guard);
    }

    fn pop_scope(&mut self, name: &str) {
        let popped = std::mem::replace(
            &mut self.current_scope_guard,
            self.guard_stack.pop().unwrap_or_default(),
        );
        trace!(target: LOG_TARGET_VISIT, "<<< Exiting Scope: {} | Popped Guard: {:?}", name.cyan(), popped);
    }

    fn record(&mut self, discovered: Discovered) {
        let (name, guard) = match &discovered {
            Discovered::Type(t) => (&t.name, &t.guard),
            Discovered::Function(f) => (&f.name, &f.guard),
        };
        debug!(target: LOG_TARGET_VISIT, "{} {} {}",
            "Found".log_header(),
            name.log_name(),
            guard.as_ref().map(|g| g.to_string()).unwrap_or_default().log_guard()
        );
        self.discovered.push(discovered);
    }

    fn process_struct(&self, item: &ItemStruct) -> Result<Option<TypeVariant>, IngestError> {
        let name = item.ident.to_string();
        if !item.generics.params.is_empty() {
            debug!(target: LOG_TARGET_VISIT, "Skipping generic struct {}", name.log_name());
            return Ok(None);
        }
        let guard = self.effective_guard(&item.attrs)?;
        if !is_repr_c(&item.attrs) {
            return Ok(Some(TypeVariant::opaque(name, guard)));
        }
        let fields = process_fields(&name, &item.fields)?;
        Ok(Some(TypeVariant::structure(name, guard, fields)))
    }

    fn process_union(&self, item: &ItemUnion) -> Result<Option<TypeVariant>, IngestError> {
        let name = item.ident.to_string();
        if !item.generics.params.is_empty() {
            debug!(target: LOG_TARGET_VISIT, "Skipping generic union {}", name.log_name());
            return Ok(None);
        }
        let guard = self.effective_guard(&item.attrs)?;
        if !is_repr_c(&item.attrs) {
            return Ok(Some(TypeVariant::opaque(name, guard)));
        }
        let fields = item
            .fields
            .named
            .iter()
            .map(|field| named_field(&name, field, 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(TypeVariant::new(name, TypeKind::Union, guard, fields)))
    }

    /// Fieldless enums with `repr(C)` or an integer repr. Others are opaque.
    fn process_enum(&self, item: &ItemEnum) -> Result<Option<TypeVariant>, IngestError> {
        let name = item.ident.to_string();
        if !item.generics.params.is_empty() {
            debug!(target: LOG_TARGET_VISIT, "Skipping generic enum {}", name.log_name());
            return Ok(None);
        }
        let guard = self.effective_guard(&item.attrs)?;
        let repr = int_repr(&item.attrs);
        if repr.is_none() && !is_repr_c(&item.attrs) {
            return Ok(Some(TypeVariant::opaque(name, guard)));
        }
        if let Some(variant) = item.variants.iter().find(|v| !v.fields.is_empty()) {
            return Err(IngestError::UnsupportedEnum {
                item: name,
                variant: variant.ident.to_string(),
                line: variant.ident.span().start().line,
            });
        }
        let enumerators = item.variants.iter().map(|v| v.ident.to_string());
        Ok(Some(TypeVariant::enumeration(name, guard, repr, enumerators)))
    }

    /// `type Name = Target;`. Aliases of types outside the supported subset are skipped.
    fn process_alias(&self, item: &ItemType) -> Result<Option<TypeVariant>, IngestError> {
        let name = item.ident.to_string();
        if !item.generics.params.is_empty() {
            debug!(target: LOG_TARGET_VISIT, "Skipping generic alias {}", name.log_name());
            return Ok(None);
        }
        let guard = self.effective_guard(&item.attrs)?;
        match process_type(&name, &item.ty) {
            Ok(target) => Ok(Some(TypeVariant::alias(name, guard, target))),
            Err(IngestError::UnsupportedType { ty, .. }) => {
                debug!(target: LOG_TARGET_VISIT, "Skipping alias {} of `{}`", name.log_name(), ty);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn process_fn(&self, func: &ItemFn) -> Result<Option<FunctionVariant>, IngestError> {
        let name = func.sig.ident.to_string();
        if !is_extern_c(func.sig.abi.as_ref()) || !is_no_mangle(&func.attrs) {
            trace!(target: LOG_TARGET_VISIT, "Skipping non-exported fn {}", name.log_name());
            return Ok(None);
        }
        let guard = self.effective_guard(&func.attrs)?;
        let args = func
            .sig
            .inputs
            .iter()
            .enumerate()
            .filter_map(|(i, arg)| match arg {
                syn::FnArg::Typed(pat_type) => Some((i, pat_type)),
                syn::FnArg::Receiver(_) => None,
            })
            .map(|(i, pat_type)| {
                let arg_name = match pat_type.pat.as_ref() {
                    syn::Pat::Ident(ident) => ident.ident.to_string(),
                    _ => format!("_{i}"),
                };
                Ok(Field::new(arg_name, process_type(&name, &pat_type.ty)?))
            })
            .collect::<Result<Vec<_>, IngestError>>()?;
        let ret = process_return(&name, &func.sig.output)?;
        Ok(Some(FunctionVariant::new(name, guard, args, ret)))
    }
}

fn process_fields(item: &str, fields: &Fields) -> Result<Vec<Field>, IngestError> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| named_field(item, field, i))
        .collect()
}

/// Tuple fields are named `_0`, `_1`, ..
fn named_field(item: &str, field: &syn::Field, index: usize) -> Result<Field, IngestError> {
    let name = field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("_{index}"));
    Ok(Field::new(name, process_type(item, &field.ty)?))
}

impl<'ast> Visit<'ast> for CodeVisitor<'_> {
    fn visit_file(&mut self, file: &'ast syn::File) {
        // `#![cfg(..)]` at the top of the file guards everything in it.
        match self.effective_guard(&file.attrs) {
            Ok(guard) => {
                self.push_scope("<file>", guard);
                syn::visit::visit_file(self, file);
                self.pop_scope("<file>");
            }
            Err(err) => self.fail(err),
        }
    }

    fn visit_item_mod(&mut self, module: &'ast ItemMod) {
        if self.error.is_some() {
            return;
        }
        let name = module.ident.to_string();
        match self.effective_guard(&module.attrs) {
            Ok(guard) => {
                self.push_scope(&name, guard);
                // Only inline modules have content; `mod foo;` is not followed.
                syn::visit::visit_item_mod(self, module);
                self.pop_scope(&name);
            }
            Err(err) => self.fail(err),
        }
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        if self.error.is_some() {
            return;
        }
        match self.process_struct(item) {
            Ok(Some(variant)) => self.record(Discovered::Type(variant)),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    fn visit_item_union(&mut self, item: &'ast ItemUnion) {
        if self.error.is_some() {
            return;
        }
        match self.process_union(item) {
            Ok(Some(variant)) => self.record(Discovered::Type(variant)),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    fn visit_item_enum(&mut self, item: &'ast ItemEnum) {
        if self.error.is_some() {
            return;
        }
        match self.process_enum(item) {
            Ok(Some(variant)) => self.record(Discovered::Type(variant)),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    fn visit_item_type(&mut self, item: &'ast ItemType) {
        if self.error.is_some() {
            return;
        }
        match self.process_alias(item) {
            Ok(Some(variant)) => self.record(Discovered::Type(variant)),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    // Function bodies are not descended into.
    fn visit_item_fn(&mut self, func: &'ast ItemFn) {
        if self.error.is_some() {
            return;
        }
        match self.process_fn(func) {
            Ok(Some(function)) => self.record(Discovered::Function(function)),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    // Nor are impl blocks, traits or foreign blocks.
    fn visit_item_impl(&mut self, _: &'ast syn::ItemImpl) {}
    fn visit_item_trait(&mut self, _: &'ast syn::ItemTrait) {}
    fn visit_item_foreign_mod(&mut self, _: &'ast syn::ItemForeignMod) {}
}
