use cfgbind_core::{Guard, Primitive};
use cfgbind_resolve::BindConfig;
use log::trace;
use quote::ToTokens;
use syn::{parse::Parser, punctuated::Punctuated};

use crate::error::IngestError;
use crate::utils::{LOG_TARGET_CFG, LogStyle};

/// Parses every `#[cfg(...)]` attribute in `attrs` and conjoins them into one guard.
///
/// Returns `Ok(None)` when there are no `cfg` attributes. Attributes are combined in source
/// order; each predicate must have an entry in `config.defines`.
pub(crate) fn guard_from_attrs(
    attrs: &[syn::Attribute],
    config: &BindConfig,
) -> Result<Option<Guard>, IngestError> {
    let mut guards = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("cfg")) {
        let tokens = match &attr.meta {
            syn::Meta::List(list) => list.tokens.to_string(),
            other => {
                return Err(IngestError::CfgParse {
                    cfg: other.to_token_stream().to_string(),
                    message: "expected `cfg(...)`".to_string(),
                });
            }
        };
        let cfg: parse_cfg::Cfg =
            format!("cfg({tokens})")
                .parse()
                .map_err(|e| IngestError::CfgParse {
                    cfg: tokens.clone(),
                    message: format!("{e}"),
                })?;
        let guard = cfg_to_guard(&cfg, config)?;
        trace!(target: LOG_TARGET_CFG, "cfg({}) -> {}", tokens, guard.to_string().log_guard());
        guards.push(guard);
    }
    Ok(Guard::join_all(guards))
}

/// Maps a parsed cfg predicate onto flags through the `[defines]` table.
///
/// `feature = "serde"` is looked up as `feature = serde`, a bare `unix` as `unix`.
pub(crate) fn cfg_to_guard(cfg: &parse_cfg::Cfg, config: &BindConfig) -> Result<Guard, IngestError> {
    match cfg {
        parse_cfg::Cfg::Any(children) => Ok(Guard::Any(
            children
                .iter()
                .map(|c| cfg_to_guard(c, config))
                .collect::<Result<_, _>>()?,
        )),
        parse_cfg::Cfg::All(children) => Ok(Guard::All(
            children
                .iter()
                .map(|c| cfg_to_guard(c, config))
                .collect::<Result<_, _>>()?,
        )),
        parse_cfg::Cfg::Not(inner) => Ok(Guard::not(cfg_to_guard(inner, config)?)),
        parse_cfg::Cfg::Equal(key, value) => lookup_define(&format!("{key} = {value}"), config),
        parse_cfg::Cfg::Is(name) => lookup_define(name, config),
        #[allow(unreachable_patterns)]
        other => Err(IngestError::CfgParse {
            cfg: format!("{other:?}"),
            message: "unsupported cfg predicate".to_string(),
        }),
    }
}

fn lookup_define(predicate: &str, config: &BindConfig) -> Result<Guard, IngestError> {
    config
        .define_for(predicate)
        .map(Guard::defined)
        .ok_or_else(|| IngestError::MissingDefine {
            predicate: predicate.to_string(),
        })
}

/// Every hint listed in `#[repr(..)]` attributes, e.g. `C`, `u32` or `packed`.
fn repr_hints(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("repr"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated)
                .ok()
        })
        .flat_map(|hints| {
            hints
                .into_iter()
                .filter_map(|hint| hint.path().get_ident().map(ToString::to_string))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// `#[repr(C)]`, alone or next to other hints such as `packed`.
pub(crate) fn is_repr_c(attrs: &[syn::Attribute]) -> bool {
    repr_hints(attrs).iter().any(|hint| hint == "C")
}

/// The integer representation of an enum, as in `#[repr(u32)]` or `#[repr(C, u8)]`.
pub(crate) fn int_repr(attrs: &[syn::Attribute]) -> Option<Primitive> {
    repr_hints(attrs)
        .iter()
        .filter_map(|hint| Primitive::from_rust_name(hint))
        .find(|prim| {
            !matches!(
                prim,
                Primitive::Void | Primitive::Bool | Primitive::Char | Primitive::F32 | Primitive::F64
            )
        })
}

/// `#[no_mangle]`, or its edition 2024 spelling `#[unsafe(no_mangle)]`.
pub(crate) fn is_no_mangle(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| match &attr.meta {
        syn::Meta::Path(path) => path.is_ident("no_mangle"),
        syn::Meta::List(list) if list.path.is_ident("unsafe") => syn::Path::parse_mod_style
            .parse2(list.tokens.clone())
            .map(|inner| inner.is_ident("no_mangle"))
            .unwrap_or(false),
        _ => false,
    })
}

/// `extern "C"` or a bare `extern`, which defaults to the C ABI.
pub(crate) fn is_extern_c(abi: Option<&syn::Abi>) -> bool {
    match abi {
        Some(abi) => abi.name.as_ref().is_none_or(|name| name.value() == "C"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BindConfig {
        BindConfig::from_toml_str(
            r#"
            [defines]
            "unix" = "PLATFORM_UNIX"
            "windows" = "PLATFORM_WIN"
            "feature = x11" = "X11"
            "#,
        )
        .unwrap()
    }

    fn attrs(item: &str) -> Vec<syn::Attribute> {
        let item: syn::ItemStruct = syn::parse_str(item).unwrap();
        item.attrs
    }

    #[test]
    fn nested_predicates_map_to_guards() {
        let attrs = attrs(r#"#[cfg(all(unix, feature = "x11"))] struct S;"#);
        let guard = guard_from_attrs(&attrs, &config()).unwrap();
        assert_eq!(
            guard,
            Some(Guard::all([
                Guard::defined("PLATFORM_UNIX"),
                Guard::defined("X11")
            ]))
        );
    }

    #[test]
    fn multiple_cfgs_are_conjoined() {
        let attrs = attrs(r#"#[cfg(unix)] #[cfg(not(windows))] struct S;"#);
        let guard = guard_from_attrs(&attrs, &config()).unwrap();
        assert_eq!(
            guard,
            Some(Guard::all([
                Guard::defined("PLATFORM_UNIX"),
                Guard::not(Guard::defined("PLATFORM_WIN"))
            ]))
        );
    }

    #[test]
    fn spaced_token_strings_parse() {
        let cfg: parse_cfg::Cfg = r#"cfg(all (unix , feature = "x11"))"#.parse().unwrap();
        assert_eq!(
            cfg_to_guard(&cfg, &config()).unwrap(),
            Guard::all([Guard::defined("PLATFORM_UNIX"), Guard::defined("X11")])
        );
    }

    #[test]
    fn no_cfg_means_no_guard() {
        let attrs = attrs("#[derive(Debug)] struct S;");
        assert_eq!(guard_from_attrs(&attrs, &config()).unwrap(), None);
    }

    #[test]
    fn unmapped_predicate_is_reported() {
        let attrs = attrs(r#"#[cfg(target_os = "macos")] struct S;"#);
        assert_eq!(
            guard_from_attrs(&attrs, &config()).unwrap_err(),
            IngestError::MissingDefine {
                predicate: "target_os = macos".into()
            }
        );
    }

    #[test]
    fn repr_and_no_mangle_detection() {
        assert!(is_repr_c(&attrs("#[repr(C)] struct S;")));
        assert!(is_repr_c(&attrs("#[repr(C, packed)] struct S;")));
        assert!(!is_repr_c(&attrs("#[repr(transparent)] struct S;")));
        assert_eq!(int_repr(&attrs("#[repr(u32)] struct S;")), Some(Primitive::U32));
        assert_eq!(int_repr(&attrs("#[repr(C, i8)] struct S;")), Some(Primitive::I8));
        assert_eq!(int_repr(&attrs("#[repr(C)] struct S;")), None);

        let func: syn::ItemFn = syn::parse_str(r#"#[unsafe(no_mangle)] pub extern "C" fn f() {}"#).unwrap();
        assert!(is_no_mangle(&func.attrs));
        assert!(is_extern_c(func.sig.abi.as_ref()));

        let func: syn::ItemFn = syn::parse_str(r#"#[no_mangle] pub extern "system" fn f() {}"#).unwrap();
        assert!(is_no_mangle(&func.attrs));
        assert!(!is_extern_c(func.sig.abi.as_ref()));
    }
}
