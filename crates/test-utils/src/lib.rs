//! Shared setup for integration tests across the workspace.
use cfgbind_common::fixture_path;
use cfgbind_core::{Configuration, Field, FunctionVariant, Guard, Primitive, TypeRef, TypeVariant};
use cfgbind_resolve::{BindConfig, DefinitionTable};
use cfg_ingest::IngestError;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber filtered by `RUST_LOG`. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Source text of a fixture under `tests/fixtures`.
pub fn fixture_source(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

/// The `BindConfig` stored next to a fixture, e.g. `cfg_2.toml` for `cfg_2`.
pub fn fixture_config(stem: &str) -> BindConfig {
    BindConfig::from_toml_str(&fixture_source(&format!("{stem}.toml")))
        .unwrap_or_else(|e| panic!("Invalid fixture config {stem}.toml: {e}"))
}

/// Ingests `<stem>.rs` with `<stem>.toml`.
pub fn ingest_fixture(stem: &str) -> Result<DefinitionTable, IngestError> {
    let config = fixture_config(stem);
    cfg_ingest::ingest_source(&fixture_source(&format!("{stem}.rs")), &config)
}

/// The `cfg_2` scenario built by hand, in the same registration order as the fixture source.
///
/// `Foo` is guarded by `NOT_DEFINED || DEFINED`, `Bar` has one variant per flag, `Root`
/// embeds `Bar` and the function `root` takes a `Root`.
pub fn cfg2_table() -> DefinitionTable {
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
    table.register_function(FunctionVariant::new(
        "root",
        None,
        vec![Field::new("a", TypeRef::named("Root"))],
        None,
    ));
    table
}

pub fn cfg2_config(defined: bool, not_defined: bool) -> Configuration {
    Configuration::new()
        .with("DEFINED", defined)
        .with("NOT_DEFINED", not_defined)
}

/// One tag enum, one handle type and one `root` signature per platform.
pub fn platform_table() -> DefinitionTable {
    let unix_x11 = Guard::all([Guard::defined("PLATFORM_UNIX"), Guard::defined("X11")]);
    let win_or_32 = Guard::any([Guard::defined("PLATFORM_WIN"), Guard::defined("M_32")]);
    let tag = |name: &str, guard: &Guard| {
        TypeVariant::enumeration(name, Some(guard.clone()), Some(Primitive::U32), ["A", "B", "C"])
    };
    let handle_fields = |tag: &str| {
        vec![
            Field::new("ty", TypeRef::named(tag)),
            Field::new("x", Primitive::I32),
            Field::new("y", Primitive::F32),
        ]
    };

    let mut table = DefinitionTable::new();
    table.register_variant(tag("FooType", &unix_x11));
    table.register_variant(tag("BarType", &win_or_32));
    table.register("FooHandle", Some(unix_x11.clone()), handle_fields("FooType"));
    table.register("BarHandle", Some(win_or_32.clone()), handle_fields("BarType"));
    table.register_function(FunctionVariant::new(
        "root",
        Some(unix_x11),
        vec![Field::new("a", TypeRef::named("FooHandle"))],
        None,
    ));
    table.register_function(FunctionVariant::new(
        "root",
        Some(win_or_32),
        vec![Field::new("a", TypeRef::named("BarHandle"))],
        None,
    ));
    table
}
