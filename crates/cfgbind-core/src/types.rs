use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Primitive {
    Void,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl Primitive {
    /// Maps a Rust primitive spelling (`i32`, `usize`, `c_void`, ..) to its primitive kind.
    pub fn from_rust_name(name: &str) -> Option<Self> {
        let prim = match name {
            "c_void" => Primitive::Void,
            "bool" => Primitive::Bool,
            "char" => Primitive::Char,
            "i8" => Primitive::I8,
            "i16" => Primitive::I16,
            "i32" => Primitive::I32,
            "i64" => Primitive::I64,
            "isize" => Primitive::Isize,
            "u8" => Primitive::U8,
            "u16" => Primitive::U16,
            "u32" => Primitive::U32,
            "u64" => Primitive::U64,
            "usize" => Primitive::Usize,
            "f32" => Primitive::F32,
            "f64" => Primitive::F64,
            _ => return None,
        };
        Some(prim)
    }

    pub fn rust_name(&self) -> &'static str {
        match self {
            Primitive::Void => "c_void",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
        }
    }
}

/// A reference from a field, argument or return position to some type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(Primitive),
    Named(String),
    Ptr { is_const: bool, pointee: Box<TypeRef> },
    Array { element: Box<TypeRef>, len: usize },
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn ptr(pointee: TypeRef) -> Self {
        TypeRef::Ptr {
            is_const: false,
            pointee: Box::new(pointee),
        }
    }

    pub fn const_ptr(pointee: TypeRef) -> Self {
        TypeRef::Ptr {
            is_const: true,
            pointee: Box::new(pointee),
        }
    }

    pub fn array(element: TypeRef, len: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            len,
        }
    }

    /// The named type this reference embeds by value, if any.
    ///
    /// Arrays embed their element by value; pointers do not, so a type reached only through a
    /// pointer never has to be declared before the type that points at it.
    pub fn value_dependency(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Array { element, .. } => element.value_dependency(),
            TypeRef::Primitive(_) | TypeRef::Ptr { .. } => None,
        }
    }

    /// The named type this reference mentions at all, through any number of pointers or arrays.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Array { element, .. } => element.referenced_name(),
            TypeRef::Ptr { pointee, .. } => pointee.referenced_name(),
            TypeRef::Primitive(_) => None,
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(value: Primitive) -> Self {
        TypeRef::Primitive(value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.rust_name()),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Ptr { is_const: true, pointee } => write!(f, "*const {pointee}"),
            TypeRef::Ptr { is_const: false, pointee } => write!(f, "*mut {pointee}"),
            TypeRef::Array { element, len } => write!(f, "[{element}; {len}]"),
        }
    }
}

/// A `(name, type)` pair of a structure, union or function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointers_break_value_dependencies() {
        let by_value = TypeRef::named("Foo");
        let through_array = TypeRef::array(TypeRef::named("Foo"), 4);
        let through_ptr = TypeRef::ptr(TypeRef::named("Foo"));

        assert_eq!(by_value.value_dependency(), Some("Foo"));
        assert_eq!(through_array.value_dependency(), Some("Foo"));
        assert_eq!(through_ptr.value_dependency(), None);
        assert_eq!(through_ptr.referenced_name(), Some("Foo"));
    }

    #[test]
    fn primitives_reference_nothing() {
        let ty = TypeRef::from(Primitive::I32);
        assert_eq!(ty.referenced_name(), None);
        assert_eq!(ty.to_string(), "i32");
        assert_eq!(Primitive::from_rust_name("usize"), Some(Primitive::Usize));
        assert_eq!(Primitive::from_rust_name("String"), None);
    }

    #[test]
    fn display_nests_pointers_and_arrays() {
        let ty = TypeRef::const_ptr(TypeRef::array(Primitive::U8.into(), 16));
        assert_eq!(ty.to_string(), "*const [u8; 16]");
    }
}
