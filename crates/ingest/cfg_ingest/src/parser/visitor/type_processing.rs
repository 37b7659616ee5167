use cfgbind_core::{Primitive, TypeRef};
use quote::ToTokens;
use syn::{Expr, ExprLit, Lit, ReturnType, Type, TypePath, spanned::Spanned};

use crate::error::IngestError;

// Converts a field or argument type into a `TypeRef`. `item` names the enclosing item for errors.
pub(crate) fn process_type(item: &str, ty: &Type) -> Result<TypeRef, IngestError> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => {
            let Some(segment) = path.segments.last() else {
                return Err(unsupported(item, ty));
            };
            if !segment.arguments.is_empty() {
                return Err(unsupported(item, ty));
            }
            let ident = segment.ident.to_string();
            Ok(match Primitive::from_rust_name(&ident) {
                Some(primitive) => TypeRef::Primitive(primitive),
                None => TypeRef::named(ident),
            })
        }
        Type::Ptr(ptr) => {
            let pointee = process_type(item, &ptr.elem)?;
            Ok(if ptr.const_token.is_some() {
                TypeRef::const_ptr(pointee)
            } else {
                TypeRef::ptr(pointee)
            })
        }
        Type::Array(array) => {
            let len = match &array.len {
                Expr::Lit(ExprLit {
                    lit: Lit::Int(int), ..
                }) => int.base10_parse::<usize>()?,
                _ => return Err(unsupported(item, ty)),
            };
            Ok(TypeRef::array(process_type(item, &array.elem)?, len))
        }
        Type::Paren(paren) => process_type(item, &paren.elem),
        Type::Group(group) => process_type(item, &group.elem),
        _ => Err(unsupported(item, ty)),
    }
}

/// `None` for `-> ()` and for a missing return type.
pub(crate) fn process_return(item: &str, output: &ReturnType) -> Result<Option<TypeRef>, IngestError> {
    match output {
        ReturnType::Default => Ok(None),
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Tuple(tuple) if tuple.elems.is_empty() => Ok(None),
            ty => process_type(item, ty).map(Some),
        },
    }
}

fn unsupported(item: &str, ty: &Type) -> IngestError {
    IngestError::UnsupportedType {
        item: item.to_string(),
        ty: ty.to_token_stream().to_string(),
        line: ty.span().start().line,
    }
}
