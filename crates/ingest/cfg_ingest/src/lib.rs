//! Builds a [`DefinitionTable`] from Rust source.
//!
//! `#[repr(C)]` structs and unions, fieldless `repr` enums, type aliases, other structs and
//! enums (as opaque types) and exported `extern "C"` functions are collected together with the guard their `#[cfg(..)]`
//! attributes describe. Cfg predicates are turned into flags through the `[defines]` table of
//! a [`BindConfig`].
use std::path::Path;

use cfgbind_resolve::{BindConfig, DefinitionTable};
use log::debug;
use syn::visit::Visit;

pub mod error;
mod parser;
mod utils;

pub use error::IngestError;

use parser::visitor::{CodeVisitor, Discovered};
use utils::{LOG_TARGET_VISIT, LogStyle};

/// Parses one source string into a fresh table.
pub fn ingest_source(source: &str, config: &BindConfig) -> Result<DefinitionTable, IngestError> {
    let mut ingestor = Ingestor::new(config);
    ingestor.ingest_str(source)?;
    Ok(ingestor.into_table())
}

/// Accumulates definitions from several sources into one table.
///
/// A source that fails to ingest leaves the table as it was before that source.
pub struct Ingestor<'c> {
    config: &'c BindConfig,
    table: DefinitionTable,
}

impl<'c> Ingestor<'c> {
    pub fn new(config: &'c BindConfig) -> Self {
        Self::with_table(config, DefinitionTable::new())
    }

    /// Continues filling an existing table.
    pub fn with_table(config: &'c BindConfig, table: DefinitionTable) -> Self {
        Self { config, table }
    }

    pub fn ingest_str(&mut self, source: &str) -> Result<(), IngestError> {
        let file = syn::parse_file(source)?;
        self.ingest_file(&file)
    }

    pub fn ingest_path(&mut self, path: &Path) -> Result<(), IngestError> {
        debug!(target: LOG_TARGET_VISIT, "{} {}", "Ingesting".log_header(), path.display());
        let source = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.ingest_str(&source)
    }

    pub fn ingest_file(&mut self, file: &syn::File) -> Result<(), IngestError> {
        let mut visitor = CodeVisitor::new(self.config);
        visitor.visit_file(file);
        for discovered in visitor.finish()? {
            match discovered {
                Discovered::Type(variant) => {
                    self.table.register_variant(variant);
                }
                Discovered::Function(function) => {
                    self.table.register_function(function);
                }
            }
        }
        Ok(())
    }

    pub fn table(&self) -> &DefinitionTable {
        &self.table
    }

    pub fn into_table(self) -> DefinitionTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use cfgbind_core::{Guard, Primitive, TypeKind, TypeRef};

    use super::*;

    fn config() -> BindConfig {
        BindConfig::from_toml_str(
            r#"
            [defines]
            "feature = a" = "HAS_A"
            "feature = b" = "HAS_B"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn collects_repr_c_types_and_exported_functions() {
        let source = r#"
            #[repr(C)]
            pub struct Point { x: f32, y: f32 }

            pub struct Hidden { inner: Vec<u8> }

            #[repr(C)]
            pub union Bits { word: u32, bytes: [u8; 4] }

            #[unsafe(no_mangle)]
            pub extern "C" fn make(p: *const Point) -> Bits { todo!() }

            pub fn internal(h: Hidden) {}
        "#;
        let table = ingest_source(source, &config()).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Point", "Hidden", "Bits"]);
        assert_eq!(table.variants_of("Hidden")[0].kind, TypeKind::Opaque);
        assert_eq!(table.variants_of("Bits")[0].kind, TypeKind::Union);
        assert_eq!(table.function_names().collect::<Vec<_>>(), vec!["make"]);
        let make = &table.function_variants_of("make")[0];
        assert_eq!(make.args[0].ty, TypeRef::const_ptr(TypeRef::named("Point")));
        assert_eq!(make.ret, Some(TypeRef::named("Bits")));
    }

    #[test]
    fn repr_enums_and_aliases_are_collected() {
        let source = r#"
            #[cfg(feature = "a")]
            #[repr(u32)]
            pub enum Kind { A, B = 4, C }

            #[repr(C)]
            pub enum Mode { On, Off }

            pub enum Internal { X(u8) }

            #[repr(C)]
            pub struct Tagged { kind: Kind, mode: Mode }

            pub type TaggedPtr = *mut Tagged;
            pub type Bytes = Vec<u8>;
        "#;
        let table = ingest_source(source, &config()).unwrap();
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            vec!["Kind", "Mode", "Internal", "Tagged", "TaggedPtr"]
        );
        let kind = &table.variants_of("Kind")[0];
        assert_eq!(kind.guard, Some(Guard::defined("HAS_A")));
        assert_eq!(
            kind.kind,
            TypeKind::Enum {
                repr: Some(Primitive::U32),
                enumerators: vec!["A".into(), "B".into(), "C".into()],
            }
        );
        assert!(matches!(
            table.variants_of("Mode")[0].kind,
            TypeKind::Enum { repr: None, .. }
        ));
        assert_eq!(table.variants_of("Internal")[0].kind, TypeKind::Opaque);
        assert_eq!(
            table.variants_of("TaggedPtr")[0].kind,
            TypeKind::Alias(TypeRef::ptr(TypeRef::named("Tagged")))
        );
        assert_eq!(table.variants_of("Tagged")[0].value_dependencies(), vec!["Kind", "Mode"]);
    }

    #[test]
    fn data_carrying_repr_enum_is_rejected() {
        let source = r#"
            #[repr(u8)]
            pub enum Shape { Dot, Line(u32) }
        "#;
        let err = ingest_source(source, &config()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEnum { ref item, ref variant, .. } if item == "Shape" && variant == "Line"
        ));
    }

    #[test]
    fn module_guards_are_inherited() {
        let source = r#"
            #[cfg(feature = "a")]
            mod gated {
                #[cfg(not(feature = "b"))]
                #[repr(C)]
                pub struct Inner { v: i32 }
            }
        "#;
        let table = ingest_source(source, &config()).unwrap();
        let inner = &table.variants_of("Inner")[0];
        assert_eq!(
            inner.guard,
            Some(Guard::all([
                Guard::defined("HAS_A"),
                Guard::not(Guard::defined("HAS_B"))
            ]))
        );
        assert_eq!(inner.fields[0].ty, TypeRef::Primitive(Primitive::I32));
    }

    #[test]
    fn failed_source_leaves_table_untouched() {
        let config = config();
        let mut ingestor = Ingestor::new(&config);
        ingestor
            .ingest_str("#[repr(C)] pub struct Ok1 { v: u8 }")
            .unwrap();
        let err = ingestor
            .ingest_str(
                r#"
                #[repr(C)] pub struct Ok2 { v: u8 }
                #[cfg(feature = "missing")] #[repr(C)] pub struct Bad { v: u8 }
                "#,
            )
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::MissingDefine {
                predicate: "feature = missing".into()
            }
        );
        assert_eq!(ingestor.table().names().collect::<Vec<_>>(), vec!["Ok1"]);
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = ingest_source("pub struct {", &config()).unwrap_err();
        assert!(matches!(err, IngestError::Syn(_)));
    }
}
